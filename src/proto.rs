//! Hand-rolled protobuf params for browse endpoints that require them.
//!
//! The analytics screen refuses a bare browse id; it wants a `params` blob
//! that is a protobuf message, serialized and then URL-safe base64 encoded
//! without padding. The messages involved are tiny (a channel id wrapped in
//! two levels of field 1), so this encodes them directly instead of pulling
//! in a protobuf code generator.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Appends `value` as a base-128 varint.
fn put_varint(buf: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            return;
        }
        buf.push(byte | 0x80);
    }
}

/// Appends a length-delimited field: tag, length varint, then the bytes.
fn put_bytes_field(buf: &mut Vec<u8>, field: u32, bytes: &[u8]) {
    put_varint(buf, u64::from(field << 3 | 2));
    put_varint(buf, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Encodes the `params` blob for the channel analytics browse request.
///
/// The wire layout is the channel id as field 1 of an inner message, which
/// is itself field 1 of the outer message.
pub fn encode_channel_analytics_params(channel_id: &str) -> String {
    let mut inner = Vec::with_capacity(channel_id.len() + 2);
    put_bytes_field(&mut inner, 1, channel_id.as_bytes());

    let mut outer = Vec::with_capacity(inner.len() + 2);
    put_bytes_field(&mut outer, 1, &inner);

    URL_SAFE_NO_PAD.encode(outer)
}
