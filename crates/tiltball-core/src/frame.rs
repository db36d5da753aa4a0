use crate::ball::BallSnapshot;

/// Current snapshot frame format version.
pub const FRAME_VERSION: u8 = 1;

#[derive(Debug)]
pub enum FrameError {
    EmptyFrame,
    UnsupportedVersion(u8),
    SerializeError(String),
    DeserializeError(String),
}

impl std::fmt::Display for FrameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFrame => write!(f, "empty frame"),
            Self::UnsupportedVersion(v) => {
                write!(f, "unsupported frame version: {v} (expected {FRAME_VERSION})")
            },
            Self::SerializeError(e) => write!(f, "serialize error: {e}"),
            Self::DeserializeError(e) => write!(f, "deserialize error: {e}"),
        }
    }
}

impl std::error::Error for FrameError {}

/// Encode a snapshot as a version byte followed by a MessagePack payload.
pub fn encode_snapshot(snapshot: &BallSnapshot) -> Result<Vec<u8>, FrameError> {
    let payload =
        rmp_serde::to_vec(snapshot).map_err(|e| FrameError::SerializeError(e.to_string()))?;
    let mut buf = Vec::with_capacity(1 + payload.len());
    buf.push(FRAME_VERSION);
    buf.extend_from_slice(&payload);
    Ok(buf)
}

pub fn decode_snapshot(data: &[u8]) -> Result<BallSnapshot, FrameError> {
    let (&version, payload) = data.split_first().ok_or(FrameError::EmptyFrame)?;
    if version != FRAME_VERSION {
        return Err(FrameError::UnsupportedVersion(version));
    }
    rmp_serde::from_slice(payload).map_err(|e| FrameError::DeserializeError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::Ball;

    #[test]
    fn frame_starts_with_version() {
        let snap = Ball::new(100.0, 100.0, 10.0).snapshot(7);
        let data = encode_snapshot(&snap).unwrap();
        assert_eq!(data[0], FRAME_VERSION);
        assert_eq!(decode_snapshot(&data).unwrap(), snap);
    }

    #[test]
    fn empty_frame_rejected() {
        assert!(matches!(decode_snapshot(&[]), Err(FrameError::EmptyFrame)));
    }

    #[test]
    fn unknown_version_rejected() {
        let snap = Ball::new(100.0, 100.0, 10.0).snapshot(0);
        let mut data = encode_snapshot(&snap).unwrap();
        data[0] = 9;
        assert!(matches!(
            decode_snapshot(&data),
            Err(FrameError::UnsupportedVersion(9))
        ));
    }

    #[test]
    fn truncated_payload_rejected() {
        let snap = Ball::new(100.0, 100.0, 10.0).snapshot(3);
        let data = encode_snapshot(&snap).unwrap();
        let err = decode_snapshot(&data[..data.len() / 2]).unwrap_err();
        assert!(matches!(err, FrameError::DeserializeError(_)));
        assert!(err.to_string().starts_with("deserialize error"));
    }
}
