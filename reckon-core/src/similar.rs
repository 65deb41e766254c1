//! Name similarity scoring for "did you mean" suggestions

/// Find candidate names similar to the query, best match first
///
/// Matching is case-insensitive. Candidates below the score cutoff are
/// dropped so wildly unrelated names never get suggested.
pub fn find_similar<'a, I>(query: &str, candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let query_lower = query.to_lowercase();
    let mut matches: Vec<(String, usize)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let score = similarity_score(&query_lower, &candidate.to_lowercase());
            if score > 20 {
                Some((candidate.to_string(), score))
            } else {
                None
            }
        })
        .collect();

    // Sort by similarity score (higher = more similar), then name for ties
    matches.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    matches.into_iter().map(|(name, _)| name).collect()
}

/// Calculate similarity score between two lowercase strings
fn similarity_score(query: &str, candidate: &str) -> usize {
    let mut score = 0;

    // Exact prefix match is best
    if candidate.starts_with(query) {
        score += 100;
    }
    // Contains the query
    else if candidate.contains(query) {
        score += 50;
    }
    // Query contains the candidate
    else if query.contains(candidate) {
        score += 30;
    }

    // Count characters the two names share
    let query_chars: std::collections::HashSet<char> = query.chars().collect();
    let candidate_chars: std::collections::HashSet<char> = candidate.chars().collect();
    let common = query_chars.intersection(&candidate_chars).count();
    score += common * 2;

    // Penalize length difference
    let len_diff = (query.len() as i32 - candidate.len() as i32).unsigned_abs() as usize;
    if len_diff < 5 && score > 0 {
        score += 5 - len_diff;
    }

    score
}
