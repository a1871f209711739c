pub mod id_card;
pub mod output_dir;
pub mod patient;

// --- public re-exports ---
pub use id_card::card_font::CardFonts;
pub use id_card::card_image::IdCardImage;
pub use output_dir::output_directory::OutputDirectory;
pub use patient::{Patient, PATIENTS};
