//! Live bilingual subtitle alignment.
//!
//! A growing speech transcript is matched against a pre-segmented source
//! document; each time the matched sentence changes, its pre-translated
//! counterpart is pushed to a subtitle sink.

pub mod alignment {
    pub mod domain {
        pub mod alignment_engine;
        pub mod alignment_table;
        pub mod segment;
    }
}

pub mod document {
    pub mod domain {
        pub mod document_reader;
    }
    pub mod infrastructure;
}

pub mod transcript {
    pub mod domain {
        pub mod transcript_event;
        pub mod transcript_source;
    }
    pub mod infrastructure;
}

pub mod subtitle {
    pub mod domain {
        pub mod subtitle_sink;
    }
    pub mod infrastructure;
}

pub mod session {
    pub mod session_logger;
    pub mod session_runner;
    pub mod subtitle_session;
}

pub mod shared {
    pub mod constants;
}
