use schematics::{validate::dangling_nets, DanglingNet, LabelKind};

const LABEL_HEADS: [(&str, LabelKind); 2] = [
    ("label", LabelKind::Local),
    ("global_label", LabelKind::Global),
];

/// Run the label-pairing check over rendered document text. Only `(label
/// "...")` and `(global_label "...")` forms count; the same words inside
/// quoted strings are ignored.
pub fn validate_document(text: &str) -> Vec<DanglingNet> {
    let labels = label_names(text);
    dangling_nets(labels.iter().map(|(kind, name)| (*kind, name.as_str())))
}

/// Kind and name of every local and global label in document order.
pub fn label_names(text: &str) -> Vec<(LabelKind, String)> {
    let bytes = text.as_bytes();
    let mut names = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'"' => pos = skip_string(bytes, pos),
            b'(' => {
                let head = token_after_lparen(bytes, pos);
                let kind = LABEL_HEADS
                    .iter()
                    .find(|(h, _)| h.as_bytes() == head)
                    .map(|&(_, kind)| kind);
                if let Some(kind) = kind {
                    let mut idx = pos + 1 + head.len();
                    while idx < bytes.len() && bytes[idx].is_ascii_whitespace() {
                        idx += 1;
                    }
                    if idx < bytes.len() && bytes[idx] == b'"' {
                        let end = skip_string(bytes, idx);
                        let close = if end > idx + 1 && bytes[end - 1] == b'"' {
                            end - 1
                        } else {
                            end
                        };
                        names.push((kind, unescape(&text[idx + 1..close])));
                        pos = end;
                        continue;
                    }
                }
                pos += 1;
            }
            _ => pos += 1,
        }
    }

    names
}

/// Index just past the closing quote of the string starting at `start`.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let mut idx = start + 1;
    while idx < bytes.len() {
        match bytes[idx] {
            b'\\' => idx += 2,
            b'"' => return idx + 1,
            _ => idx += 1,
        }
    }
    bytes.len()
}

fn token_after_lparen(bytes: &[u8], pos: usize) -> &[u8] {
    let start = pos + 1;
    let mut idx = start;
    while idx < bytes.len() && (bytes[idx].is_ascii_alphanumeric() || bytes[idx] == b'_') {
        idx += 1;
    }
    &bytes[start..idx]
}

fn unescape(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some(other) => result.push(other),
            None => {}
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn one_sda_label_dangles() {
        let text = indoc! {r#"
            (kicad_sch
              (label "SDA" (at 226.06 104.14 0) (effects (font (size 1.27 1.27))) (uuid "a"))
              (label "SCL" (at 226.06 106.68 0) (effects (font (size 1.27 1.27))) (uuid "b"))
              (global_label "SCL" (shape bidirectional) (at 1 2 0) (uuid "c"))
            )
        "#};
        assert_eq!(
            validate_document(text),
            vec![
                DanglingNet {
                    kind: LabelKind::Local,
                    name: "SCL".to_string(),
                    occurrences: 1
                },
                DanglingNet {
                    kind: LabelKind::Global,
                    name: "SCL".to_string(),
                    occurrences: 1
                },
                DanglingNet {
                    kind: LabelKind::Local,
                    name: "SDA".to_string(),
                    occurrences: 1
                },
            ]
        );
    }

    #[test]
    fn global_labels_pair_in_their_own_namespace() {
        let text = indoc! {r#"
            (kicad_sch
              (global_label "MID" (shape passive) (at 45.72 54.61 180) (uuid "a"))
              (global_label "MID" (shape passive) (at 10.16 20.32 0) (uuid "b"))
              (label "MID" (at 68.58 50.8 180) (uuid "c"))
            )
        "#};
        assert_eq!(
            label_names(text),
            vec![
                (LabelKind::Global, "MID".to_string()),
                (LabelKind::Global, "MID".to_string()),
                (LabelKind::Local, "MID".to_string()),
            ]
        );
        assert_eq!(
            validate_document(text),
            vec![DanglingNet {
                kind: LabelKind::Local,
                name: "MID".to_string(),
                occurrences: 1
            }]
        );
    }

    #[test]
    fn label_words_inside_strings_are_ignored() {
        let text = indoc! {r#"
            (kicad_sch
              (text "(label \"FAKE\")" (at 0 0 0))
              (property "Description" "(global_label \"X\")")
              (label "A \"quoted\" net" (at 1 1 0))
              (label "A \"quoted\" net" (at 2 2 0))
            )
        "#};
        let quoted = (LabelKind::Local, "A \"quoted\" net".to_string());
        assert_eq!(label_names(text), vec![quoted.clone(), quoted]);
        assert!(validate_document(text).is_empty());
    }

    #[test]
    fn labelled_symbols_are_not_labels() {
        // `label` must be the whole head token.
        let text = r#"(labels "X") (label_x "Y") (label "Z")"#;
        assert_eq!(label_names(text), vec![(LabelKind::Local, "Z".to_string())]);
    }
}
