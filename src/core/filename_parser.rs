use regex::Regex;

/// Last path segment of an audio URL with any query/fragment and file
/// extension removed. Falls back to the whole input for odd URLs.
fn audio_stem(url: &str) -> &str {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let segment = without_query.rsplit('/').next().unwrap_or(without_query);

    match segment.rfind('.') {
        Some(idx) if idx > 0 => &segment[..idx],
        _ => segment,
    }
}

/// Stable card identifier derived from the audio URL: the filename stem
/// lowercased and slugged. "audio/03_Good_Morning.mp3" -> "good-morning".
pub fn card_id(url: &str) -> String {
    let stem = strip_track_number(audio_stem(url));

    let mut id = String::with_capacity(stem.len());
    let mut last_dash = true; // swallow leading separators
    for c in stem.chars() {
        if c.is_alphanumeric() {
            id.extend(c.to_lowercase());
            last_dash = false;
        } else if !last_dash {
            id.push('-');
            last_dash = true;
        }
    }

    while id.ends_with('-') {
        id.pop();
    }

    if id.is_empty() {
        "card".to_string()
    } else {
        id
    }
}

/// Display label derived from the audio filename:
/// "audio/03_good_morning.mp3" -> "Good Morning".
pub fn card_text(url: &str) -> String {
    clean_label(strip_track_number(audio_stem(url)))
}

/// Audio files are often prefixed with a track number ("03_", "12 - ").
fn strip_track_number(stem: &str) -> &str {
    let re = Regex::new(r"^\d{1,3}[\s._-]+").unwrap();
    match re.find(stem) {
        Some(m) => &stem[m.end()..],
        None => stem,
    }
}

fn clean_label(stem: &str) -> String {
    let mut cleaned = stem.replace(['.', '_', '-'], " ");

    let space_re = Regex::new(r"\s+").unwrap();
    cleaned = space_re.replace_all(&cleaned, " ").trim().to_string();

    let alphabetic_chars: Vec<char> = cleaned.chars().filter(|c| c.is_alphabetic()).collect();
    if alphabetic_chars.is_empty() {
        return cleaned;
    }

    let is_all_upper = alphabetic_chars.iter().all(|c| c.is_uppercase());
    let is_all_lower = alphabetic_chars.iter().all(|c| c.is_lowercase());

    // Mixed-case stems are assumed intentional and kept verbatim.
    if is_all_upper || is_all_lower {
        cleaned
            .split_whitespace()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => {
                        first.to_uppercase().collect::<String>()
                            + chars.as_str().to_lowercase().as_str()
                    }
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        cleaned
    }
}
