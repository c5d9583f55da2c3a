//! MARCXML Adapter
//!
//! MARCXML の生成と送信

pub mod generator;
pub mod sink;

pub use generator::MarcXmlGenerator;
pub use sink::{DirectoryXmlSink, HttpXmlSink, LogXmlSink, XmlSink};
