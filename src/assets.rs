// playback timing
pub const FRAME_DELAY_MS: u64 = 100;
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

// camera service
pub const DEFAULT_STREAM_URL: &str = "http://localhost:5000/video_stream";

// display surface
pub const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";
