//! Word banks for generated filler cards

use serde::Serialize;

/// Fixed phrase lists a filler card enumerates as chips
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordBanks {
    pub greetings: &'static [&'static str],
    pub introductions: &'static [&'static str],
    pub qualities: &'static [&'static str],
    pub closings: &'static [&'static str],
    pub timings: &'static [&'static str],
    pub contacts: &'static [&'static str],
}

pub const DEFAULT_WORD_BANKS: WordBanks = WordBanks {
    greetings: &["Hi", "Hey", "Hello", "Psst", "Excuse me"],
    introductions: &["I noticed", "I couldn't help but notice", "I just had to say", "I wanted you to know"],
    qualities: &["great style", "a lovely smile", "kind eyes", "amazing energy", "a great laugh", "awesome taste"],
    closings: &["wonderful", "lovely", "great", "beautiful", "fantastic"],
    timings: &["today", "tonight", "this week", "sometime", "whenever"],
    contacts: &["Phone", "Instagram", "Email", "Snapchat"],
};

impl Default for WordBanks {
    fn default() -> Self {
        DEFAULT_WORD_BANKS
    }
}

impl WordBanks {
    /// `bank` rotated left by `offset`, so consecutive cards lead with different words
    pub fn rotated(bank: &[&'static str], offset: usize) -> Vec<&'static str> {
        if bank.is_empty() {
            return Vec::new();
        }
        let shift = offset % bank.len();
        bank[shift..].iter().chain(bank[..shift].iter()).copied().collect()
    }
}
