pub mod card_font;
pub mod card_image;
pub mod text;
