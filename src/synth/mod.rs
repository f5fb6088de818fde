// Purpose: the audio-thread signal chain and the queue that feeds it
// The control layer talks to this module only through ParamMessage

pub mod chain;
pub mod clock;
#[cfg(feature = "rtrb")]
pub mod handle;
pub mod message;

pub use chain::SynthChain;
pub use clock::SampleClock;
#[cfg(feature = "rtrb")]
pub use handle::{build_chain, ChainHandle, PARAM_QUEUE_CAPACITY};
pub use message::{MessageReceiver, ParamMessage, SynthParam};
