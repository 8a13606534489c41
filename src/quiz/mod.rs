//! Quiz answers as submitted by the client.

mod models;

pub use models::{Era, GenreTag, MoodLevel, QuizAnswers, SocialContext, Tone};
