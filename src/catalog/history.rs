use std::collections::HashSet;

/// Drops targets the student has already completed.
///
/// Both sides are compared in full and in short `SUBJ:NUM` form (taken
/// from a three-part `SS:SUBJ:NUM` code), so a transcript entry
/// `01:198:111` removes a catalog target `198:111` and vice versa.
/// Order of the remaining targets is preserved.
pub fn filter_completed<S: AsRef<str>>(targets: &[S], completed: &HashSet<String>) -> Vec<String> {
    let known: HashSet<&str> = completed
        .iter()
        .flat_map(|code| [code.as_str(), short_code(code)])
        .collect();

    targets
        .iter()
        .map(AsRef::as_ref)
        .filter(|target| !known.contains(target) && !known.contains(short_code(target)))
        .map(str::to_string)
        .collect()
}

fn short_code(code: &str) -> &str {
    let parts: Vec<&str> = code.split(':').collect();
    if parts.len() == 3 {
        // Skip the school prefix and its colon.
        &code[parts[0].len() + 1..]
    } else {
        code
    }
}
