pub mod writer_subtitle_sink;
