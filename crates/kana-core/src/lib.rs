pub mod buffer;
pub mod kana;
pub mod romaji;
pub mod settings;
