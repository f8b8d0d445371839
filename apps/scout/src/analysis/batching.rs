use crate::models::job::JobPosting;

/// Jobs per language-service request. Sized so the structured JSON answer for
/// a whole batch stays inside the model's output window.
pub const BATCH_SIZE: usize = 15;

/// Splits `jobs` into consecutive batches of at most `BATCH_SIZE`, preserving order.
pub fn partition(jobs: &[JobPosting]) -> Vec<&[JobPosting]> {
    jobs.chunks(BATCH_SIZE).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn jobs(n: usize) -> Vec<JobPosting> {
        (0..n)
            .map(|i| JobPosting {
                id: format!("job-{i}"),
                title: format!("Title {i}"),
                company: "Acme".to_string(),
                location: "Remote".to_string(),
                posted_date: "Recent".to_string(),
                url: "#".to_string(),
                description: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_empty_input_has_no_batches() {
        assert!(partition(&[]).is_empty());
    }

    #[test]
    fn test_sixteen_jobs_make_two_batches() {
        let input = jobs(16);
        let batches = partition(&input);
        let sizes: Vec<usize> = batches.iter().map(|b| b.len()).collect();
        assert_eq!(sizes, vec![15, 1]);
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_batch() {
        let input = jobs(30);
        assert_eq!(partition(&input).len(), 2);
    }

    #[test]
    fn test_batches_cover_input_in_order_without_overlap() {
        for n in [1, 14, 15, 16, 44, 45, 46, 100] {
            let input = jobs(n);
            let batches = partition(&input);

            assert_eq!(batches.len(), n.div_ceil(BATCH_SIZE), "n={n}");
            assert!(batches.iter().all(|b| !b.is_empty() && b.len() <= BATCH_SIZE));

            let flattened: Vec<&JobPosting> = batches.iter().flat_map(|b| b.iter()).collect();
            let original: Vec<&JobPosting> = input.iter().collect();
            assert_eq!(flattened, original, "n={n}");

            let mut seen = HashSet::new();
            for job in flattened {
                assert!(seen.insert(job.id.clone()), "duplicate id {}", job.id);
            }
        }
    }
}
