//! Protocol module containing the request type and the binary codec.

pub mod codec;
pub mod messages;

pub use codec::{
    decode_reply, decode_request, encode_reply, encode_request, Decoded, ProtocolError,
    RequestDecoder,
};
pub use messages::*;
