// Bounded copies into caller-owned buffers; every write leaves a NUL terminator.
use crate::core::error::{Error, ErrorKind};

/// Copies at most `dst.len() - 1` bytes of `src` into `dst` and terminates
/// the copy with a NUL byte.
///
/// Returns the number of value bytes written (the terminator is not counted).
/// Bytes past the terminator are left untouched. A zero-length destination
/// cannot hold a terminator and is rejected as a usage error.
pub fn copy_terminated(dst: &mut [u8], src: &[u8]) -> Result<usize, Error> {
    let Some(room) = dst.len().checked_sub(1) else {
        return Err(Error::new(ErrorKind::Usage).with_message("buffer capacity must be at least 1"));
    };
    let copied = src.len().min(room);
    dst[..copied].copy_from_slice(&src[..copied]);
    dst[copied] = 0;
    Ok(copied)
}

/// String form of [`copy_terminated`]: the longest prefix of `value` that fits
/// in `capacity - 1` bytes without splitting a UTF-8 sequence.
pub fn truncate_str(value: &str, capacity: usize) -> Result<&str, Error> {
    let Some(room) = capacity.checked_sub(1) else {
        return Err(Error::new(ErrorKind::Usage).with_message("buffer capacity must be at least 1"));
    };
    if value.len() <= room {
        return Ok(value);
    }
    let mut end = room;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    Ok(&value[..end])
}

#[cfg(test)]
mod tests {
    use super::{copy_terminated, truncate_str};
    use crate::core::error::ErrorKind;

    #[test]
    fn short_value_is_copied_whole() {
        let mut buf = [0xAAu8; 40];
        let copied = copy_terminated(&mut buf, b"algo-1").expect("copy");
        assert_eq!(copied, 6);
        assert_eq!(&buf[..7], b"algo-1\0");
        assert_eq!(buf[7], 0xAA);
    }

    #[test]
    fn long_value_is_truncated_and_terminated() {
        let mut buf = [0xAAu8; 5];
        let copied = copy_terminated(&mut buf, b"algo-12345").expect("copy");
        assert_eq!(copied, 4);
        assert_eq!(&buf, b"algo\0");
    }

    #[test]
    fn exact_fit_loses_last_byte_to_terminator() {
        let mut buf = [0xAAu8; 6];
        let copied = copy_terminated(&mut buf, b"algo-1").expect("copy");
        assert_eq!(copied, 5);
        assert_eq!(&buf, b"algo-\0");
    }

    #[test]
    fn single_byte_buffer_holds_only_terminator() {
        let mut buf = [0xAAu8; 1];
        assert_eq!(copy_terminated(&mut buf, b"algo-1").expect("copy"), 0);
        assert_eq!(buf, [0]);
    }

    #[test]
    fn zero_capacity_is_usage_error() {
        let mut buf: [u8; 0] = [];
        let err = copy_terminated(&mut buf, b"algo-1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert_eq!(truncate_str("algo-1", 0).unwrap_err().kind(), ErrorKind::Usage);
    }

    #[test]
    fn truncate_str_respects_char_boundaries() {
        assert_eq!(truncate_str("algo-1", 40).unwrap(), "algo-1");
        assert_eq!(truncate_str("algo-1", 5).unwrap(), "algo");
        // "hé" is 3 bytes; room for 2 would split the é.
        assert_eq!(truncate_str("hé", 3).unwrap(), "h");
        assert_eq!(truncate_str("hé", 4).unwrap(), "hé");
    }
}
