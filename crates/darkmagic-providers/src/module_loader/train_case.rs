//! camelCase to train-case conversion for file names

/// `findPort` becomes `find-port`
///
/// Returns `None` when the name has no inner capitals and would not change.
pub fn dashify(name: &str) -> Option<String> {
    if !name.chars().skip(1).any(char::is_uppercase) {
        return None;
    }

    let mut dashed = String::with_capacity(name.len() + 4);
    for (index, letter) in name.chars().enumerate() {
        if letter.is_uppercase() {
            if index > 0 {
                dashed.push('-');
            }
            dashed.extend(letter.to_lowercase());
        } else {
            dashed.push(letter);
        }
    }
    Some(dashed)
}

/// Names to try for `name`, the name itself first
pub(crate) fn candidates(name: &str) -> Vec<String> {
    let mut names = vec![name.to_string()];
    names.extend(dashify(name));
    names
}
