pub mod extractor;
pub mod fetcher;
pub mod gemini;
pub mod invoice;
pub mod ocr;

pub use extractor::InvoiceExtractor;
pub use fetcher::{HttpFetcher, PdfFetcher};
pub use gemini::{GeminiClient, StructuredModel};
pub use invoice::InvoiceService;
pub use ocr::{TesseractOcr, TextRecognizer};
