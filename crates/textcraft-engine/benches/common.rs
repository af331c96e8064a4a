// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use textcraft_engine::{Document, TextFormat};

#[allow(dead_code)]
pub fn generate_text(size: usize) -> String {
    let base = "The quick brown fox jumps over the lazy dog.\n";
    base.repeat(size)
}

/// Document where every other word is formatted, so shifts touch many keys
#[allow(dead_code)]
pub fn generate_formatted_document(size: usize) -> Document {
    let text = generate_text(size);
    let mut doc = Document::new();
    doc.insert_text(0, &text);

    let mut offset = 0;
    for (index, word) in text.split(' ').enumerate() {
        let len = word.chars().count();
        if index % 2 == 0 {
            doc.apply_format(offset, len, TextFormat::BOLD);
        }
        offset += len + 1;
    }
    doc
}
