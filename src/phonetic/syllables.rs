// WHY: Orthographic syllabification for English and Spanish
// These are reading-aid heuristics over spelling, not phonology; the split rules must stay stable
// because readability scores are computed from the resulting syllable counts

use serde::{Deserialize, Serialize};

use crate::lexicon::{SPANISH_DIPHTHONGS, SPANISH_INSEPARABLE_CLUSTERS};

/// One syllable split into onset (leading consonants), nucleus (vowels) and coda
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllableInfo {
    pub syllable: String,
    pub stress: bool,
    pub onset: String,
    pub nucleus: String,
    pub coda: String,
}

impl SyllableInfo {
    fn from_parts(onset: &[char], nucleus: &[char], coda: &[char]) -> Self {
        let onset: String = onset.iter().collect();
        let nucleus: String = nucleus.iter().collect();
        let coda: String = coda.iter().collect();
        Self {
            syllable: format!("{onset}{nucleus}{coda}"),
            stress: false,
            onset,
            nucleus,
            coda,
        }
    }

    /// Whole word as a single syllable, used when no vowel nucleus exists
    fn whole(word: &str) -> Self {
        Self {
            syllable: word.to_string(),
            stress: false,
            onset: word.to_string(),
            nucleus: String::new(),
            coda: String::new(),
        }
    }

    /// True when the onset or the coda holds more than two characters
    pub fn has_complex_cluster(&self) -> bool {
        self.onset.chars().count() > 2 || self.coda.chars().count() > 2
    }
}

/// Syllables of a lowercased English word
///
/// Nuclei are maximal runs of a/e/i/o/u/y; the consonants between two nuclei are split with
/// the first ceil(n/2) closing the previous syllable and the rest opening the next.
pub fn syllabify_english(word: &str) -> Vec<SyllableInfo> {
    let chars: Vec<char> = word.chars().collect();
    let nuclei = english_nuclei(&chars);
    assemble(word, &chars, &nuclei, |cluster| cluster.len().div_ceil(2))
}

/// Syllables of a lowercased Spanish word
///
/// Adjacent vowels share a nucleus only when they form a listed diphthong; a written accent on
/// either vowel forces a hiatus. Consonants between nuclei go to the next onset unless the cluster
/// rules keep part of them as the previous coda.
pub fn syllabify_spanish(word: &str) -> Vec<SyllableInfo> {
    let chars: Vec<char> = word.chars().collect();
    let nuclei = spanish_nuclei(&chars);
    assemble(word, &chars, &nuclei, spanish_coda_length)
}

/// Index of the stressed syllable
///
/// A written accent wins. Otherwise English stresses the second syllable (or the only one) and
/// Spanish stresses the penultimate when the word ends in a vowel, n or s, else the last.
pub fn stress_index(syllables: &[SyllableInfo], word: &str, spanish_rules: bool) -> usize {
    if let Some(accented) = syllables
        .iter()
        .position(|s| s.syllable.chars().any(is_accented_vowel))
    {
        return accented;
    }

    let count = syllables.len();
    if count <= 1 {
        return 0;
    }
    if !spanish_rules {
        return 1;
    }

    let ends_in_vowel_n_s = word
        .chars()
        .last()
        .is_some_and(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'n' | 's'));
    if ends_in_vowel_n_s {
        count - 2
    } else {
        count - 1
    }
}

/// Build syllables from nucleus spans; `coda_length` decides how many consonants of each
/// inter-nucleus cluster stay with the preceding syllable
fn assemble(
    word: &str,
    chars: &[char],
    nuclei: &[(usize, usize)],
    coda_length: impl Fn(&[char]) -> usize,
) -> Vec<SyllableInfo> {
    if nuclei.is_empty() {
        return vec![SyllableInfo::whole(word)];
    }

    let mut syllables = Vec::with_capacity(nuclei.len());
    let mut onset_start = 0;

    for (i, &(start, end)) in nuclei.iter().enumerate() {
        let coda_end = match nuclei.get(i + 1) {
            Some(&(next_start, _)) => end + coda_length(&chars[end..next_start]),
            None => chars.len(),
        };
        syllables.push(SyllableInfo::from_parts(
            &chars[onset_start..start],
            &chars[start..end],
            &chars[end..coda_end],
        ));
        onset_start = coda_end;
    }

    syllables
}

fn english_nuclei(chars: &[char]) -> Vec<(usize, usize)> {
    let mut nuclei = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if matches!(chars[i], 'a' | 'e' | 'i' | 'o' | 'u' | 'y') {
            let start = i;
            while i < chars.len() && matches!(chars[i], 'a' | 'e' | 'i' | 'o' | 'u' | 'y') {
                i += 1;
            }
            nuclei.push((start, i));
        } else {
            i += 1;
        }
    }
    nuclei
}

fn spanish_nuclei(chars: &[char]) -> Vec<(usize, usize)> {
    let mut nuclei: Vec<(usize, usize)> = Vec::new();

    for i in 0..chars.len() {
        if !is_spanish_vowel_at(chars, i) {
            continue;
        }
        match nuclei.last_mut() {
            Some((_, end)) if *end == i && forms_diphthong(chars[i - 1], chars[i]) => *end = i + 1,
            _ => nuclei.push((i, i + 1)),
        }
    }

    nuclei
}

/// 'y' is a vowel only standing alone or closing a word after a vowel (hoy, muy, rey)
fn is_spanish_vowel_at(chars: &[char], i: usize) -> bool {
    match chars[i] {
        'a' | 'e' | 'i' | 'o' | 'u' | 'á' | 'é' | 'í' | 'ó' | 'ú' | 'ü' => true,
        'y' => i + 1 == chars.len() && (i == 0 || is_spanish_vowel_at(chars, i - 1)),
        _ => false,
    }
}

fn forms_diphthong(first: char, second: char) -> bool {
    let mut pair = String::with_capacity(2);
    pair.push(diphthong_base(first));
    pair.push(diphthong_base(second));
    SPANISH_DIPHTHONGS.contains(&pair.as_str())
}

/// Accented vowels stay distinct and therefore never match the list (can·ci·ón, dí·a)
fn diphthong_base(c: char) -> char {
    match c {
        'ü' => 'u',
        'y' => 'i',
        other => other,
    }
}

fn spanish_coda_length(cluster: &[char]) -> usize {
    match cluster.len() {
        0 | 1 => 0,
        2 if is_inseparable(cluster[0], cluster[1]) => 0,
        2 => 1,
        3 if is_inseparable(cluster[1], cluster[2]) => 1,
        3 => 2,
        n => n - 2,
    }
}

fn is_inseparable(first: char, second: char) -> bool {
    let mut pair = String::with_capacity(2);
    pair.push(first);
    pair.push(second);
    SPANISH_INSEPARABLE_CLUSTERS.contains(&pair.as_str())
}

fn is_accented_vowel(c: char) -> bool {
    matches!(c, 'á' | 'é' | 'í' | 'ó' | 'ú')
}
