use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::from_str;
use std::collections::VecDeque;
use std::error::Error;

static WORDS_DIR: Dir = include_dir!("src/words");

/// A static candidate word list, embedded at build time.
#[derive(Deserialize, Clone, Debug)]
pub struct Lexicon {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Lexicon {
    pub fn english() -> Self {
        read_lexicon_from_file("english.json").unwrap()
    }
}

fn read_lexicon_from_file(file_name: &str) -> Result<Lexicon, Box<dyn Error>> {
    let file = WORDS_DIR.get_file(file_name).expect("Word list not found");

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret word list as a string");

    let lexicon = from_str(file_as_str).expect("Unable to deserialize word list json");

    Ok(lexicon)
}

/// Where assigned words come from. One draw per appended slot.
pub trait WordSource {
    /// Draw the next word to assign. Draws are independent; repeats are allowed.
    fn pick(&mut self) -> String;
}

/// Uniform draws with replacement over a lexicon.
#[derive(Debug)]
pub struct RandomWordSource {
    lexicon: Lexicon,
}

impl RandomWordSource {
    pub fn new(lexicon: Lexicon) -> Self {
        assert!(!lexicon.words.is_empty(), "lexicon has no words to draw");
        Self { lexicon }
    }
}

impl WordSource for RandomWordSource {
    fn pick(&mut self) -> String {
        let mut rng = rand::thread_rng();
        self.lexicon
            .words
            .choose(&mut rng)
            .cloned()
            .expect("lexicon is never empty")
    }
}

/// Deterministic source for tests: cycles through a fixed script.
#[derive(Debug)]
pub struct ScriptedWordSource {
    script: VecDeque<String>,
}

impl ScriptedWordSource {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let script: VecDeque<String> = words.into_iter().map(Into::into).collect();
        assert!(!script.is_empty(), "scripted source needs at least one word");
        Self { script }
    }
}

impl WordSource for ScriptedWordSource {
    fn pick(&mut self) -> String {
        let word = self.script.pop_front().expect("script is never empty");
        self.script.push_back(word.clone());
        word
    }
}
