//! Search statistics tracking.

use std::collections::BTreeMap;
use std::time::Instant;

/// Get current process memory usage in bytes (RSS - Resident Set Size).
/// Returns None if unable to determine.
#[cfg(target_os = "linux")]
pub fn get_memory_usage() -> Option<u64> {
    use std::fs;

    let status = fs::read_to_string("/proc/self/status").ok()?;
    for line in status.lines() {
        if line.starts_with("VmRSS:") {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() >= 2 {
                let kb: u64 = parts[1].parse().ok()?;
                return Some(kb * 1024);
            }
        }
    }
    None
}

#[cfg(not(target_os = "linux"))]
pub fn get_memory_usage() -> Option<u64> {
    None
}

/// Format bytes as human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Counters collected during one search run. Owned by the engine and
/// mutated only by it; independent runs never share an instance.
#[derive(Debug, Default)]
pub struct SearchStats {
    /// Attempted move applications
    pub iterations: u64,

    /// Terminal losses (more than one stone, no legal move)
    pub games_over: u64,

    /// Branches skipped because a symmetry-equivalent state was
    /// already visited
    pub skipped_symmetry: u64,

    /// Deepest play line reached
    pub max_depth: u64,

    /// Completed games keyed by remaining stone count; wins sit at
    /// key 1
    pub score_histogram: BTreeMap<u32, u64>,

    /// For rate calculation
    start_time: Option<Instant>,
    last_log_time: Option<Instant>,
    last_log_iterations: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_log_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// Record a completed game by its remaining stone count.
    pub fn record_score(&mut self, remaining_stones: u32) {
        *self.score_histogram.entry(remaining_stones).or_insert(0) += 1;
    }

    /// Number of wins recorded so far.
    pub fn wins(&self) -> u64 {
        self.score_histogram.get(&1).copied().unwrap_or(0)
    }

    /// Track the deepest play line seen.
    pub fn note_depth(&mut self, depth: usize) {
        self.max_depth = self.max_depth.max(depth as u64);
    }

    /// Check if we should log progress.
    pub fn should_log(&self, interval_secs: u64) -> bool {
        if let Some(last) = self.last_log_time {
            last.elapsed().as_secs() >= interval_secs
        } else {
            true
        }
    }

    /// Log progress and reset the log timer.
    pub fn log_progress(&mut self, visited: usize) {
        let elapsed_total = self.start_time.map(|s| s.elapsed().as_secs()).unwrap_or(0);

        // Rate since the last log line
        let rate = if let Some(last) = self.last_log_time {
            let elapsed = last.elapsed().as_secs_f64();
            let iterations = self.iterations - self.last_log_iterations;
            if elapsed > 0.0 {
                iterations as f64 / elapsed
            } else {
                0.0
            }
        } else {
            0.0
        };

        let mem_str = get_memory_usage()
            .map(|m| format!(" mem={}", format_bytes(m)))
            .unwrap_or_default();

        println!(
            "[{:02}:{:02}:{:02}] iterations={} visited={} wins={} losses={} skipped={} rate={:.0}/s depth={}{}",
            elapsed_total / 3600,
            (elapsed_total % 3600) / 60,
            elapsed_total % 60,
            self.iterations,
            visited,
            self.wins(),
            self.games_over,
            self.skipped_symmetry,
            rate,
            self.max_depth,
            mem_str,
        );

        self.last_log_time = Some(Instant::now());
        self.last_log_iterations = self.iterations;
    }

    /// Print the final summary.
    pub fn print_summary(&self) {
        println!("Iterations: {}", self.iterations);
        println!("Wins: {}", self.wins());
        println!("Terminal losses: {}", self.games_over);
        println!("Skipped through symmetry: {}", self.skipped_symmetry);
        println!("Max depth: {}", self.max_depth);
        println!("Score histogram:");
        for (remaining, count) in &self.score_histogram {
            println!("  - {} games with {} stones remaining", count, remaining);
        }

        if let Some(start) = self.start_time {
            let elapsed = start.elapsed().as_secs_f64();
            if elapsed > 0.0 {
                println!(
                    "Average rate: {:.0} iterations/sec",
                    self.iterations as f64 / elapsed
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_score_histogram() {
        let mut stats = SearchStats::new();
        stats.record_score(1);
        stats.record_score(2);
        stats.record_score(2);
        assert_eq!(stats.wins(), 1);
        assert_eq!(stats.score_histogram.get(&2), Some(&2));
        assert_eq!(stats.score_histogram.get(&3), None);
    }

    #[test]
    fn test_note_depth_keeps_max() {
        let mut stats = SearchStats::new();
        stats.note_depth(5);
        stats.note_depth(3);
        assert_eq!(stats.max_depth, 5);
    }
}
