pub mod document_reader_factory;
pub mod docx_reader;
pub mod ingestion_worker;
pub mod pdf_reader;
pub mod text_file_reader;
