//! Gmail API wire types.

mod label;
mod message;

pub use label::{Label, LabelList, LabelType};
pub use message::{
    Header, Message, MessageFormat, MessageList, MessagePart, MessagePartBody, MessageRef,
    ModifyRequest,
};
