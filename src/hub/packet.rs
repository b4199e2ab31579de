//! HomeCenter wire packets
//!
//! A packet is a run of space-separated decimal integers. The first token is
//! the number of values minus one, followed by the values themselves.

/// Relay/dimmer control opcode
pub const RELAY_OPCODE: i16 = 28;

/// Output level for "on"
pub const LEVEL_ON: i16 = 255;
/// Output level for "off"
pub const LEVEL_OFF: i16 = 0;

/// Encode a command into its wire string
pub fn encode(values: &[i16]) -> String {
    let count = values.len() as isize - 1;
    let mut packet = count.to_string();
    for value in values {
        packet.push(' ');
        packet.push_str(&value.to_string());
    }
    packet
}

/// Build the packet that switches relay `id` on or off
pub fn relay_packet(id: i16, turn_on: bool) -> String {
    let level = if turn_on { LEVEL_ON } else { LEVEL_OFF };
    encode(&[RELAY_OPCODE, id, level])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_on() {
        assert_eq!(relay_packet(12, true), "2 28 12 255");
    }

    #[test]
    fn test_relay_off() {
        assert_eq!(relay_packet(7, false), "2 28 7 0");
    }

    #[test]
    fn test_encode_other_lengths() {
        assert_eq!(encode(&[28]), "0 28");
        assert_eq!(encode(&[1, 2, 3, 4]), "3 1 2 3 4");
        assert_eq!(encode(&[]), "-1");
    }

    #[test]
    fn test_encode_extreme_ids() {
        assert_eq!(relay_packet(i16::MAX, true), "2 28 32767 255");
        assert_eq!(relay_packet(0, false), "2 28 0 0");
    }
}
