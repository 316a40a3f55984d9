use shared_types::Paragraph;

/// Split text into blank-line delimited paragraphs
///
/// Lines are trimmed and joined with a single space. Offsets are character
/// offsets into `text`; `char_end` is the end of the paragraph's last line.
pub fn split_paragraphs(text: &str) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    // (joined text, char_start) of the paragraph being accumulated
    let mut current: Option<(String, usize)> = None;
    let mut char_pos = 0usize;

    for line in text.split('\n') {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            if let Some((joined, start)) = current.take() {
                paragraphs.push(Paragraph {
                    text: joined,
                    char_start: start,
                    char_end: char_pos.saturating_sub(1),
                });
            }
        } else {
            match current.as_mut() {
                Some((joined, _)) => {
                    joined.push(' ');
                    joined.push_str(trimmed);
                }
                None => current = Some((trimmed.to_string(), char_pos)),
            }
        }

        char_pos += line.chars().count() + 1;
    }

    if let Some((joined, start)) = current {
        paragraphs.push(Paragraph {
            text: joined,
            char_start: start,
            char_end: char_pos - 1,
        });
    }

    paragraphs
}
