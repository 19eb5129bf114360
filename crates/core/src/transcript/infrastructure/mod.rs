pub mod line_transcript_source;
pub mod scripted_transcript_source;
