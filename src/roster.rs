//! Staff roster with tenure-based selection

/// Year tenure is measured against by [`Staff::select`].
pub const REFERENCE_YEAR: i32 = 2024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worker {
    pub name: String,
    pub post: String,
    /// Year of hire
    pub year: i32,
}

impl Worker {
    /// Full years worked as of `reference_year`.
    pub fn tenure(&self, reference_year: i32) -> i32 {
        reference_year - self.year
    }
}

/// An append-only list of workers.
#[derive(Debug, Clone, Default)]
pub struct Staff {
    workers: Vec<Worker>,
}

impl Staff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, post: impl Into<String>, year: i32) {
        self.workers.push(Worker {
            name: name.into(),
            post: post.into(),
            year,
        });
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    /// Workers with at least `threshold` years of tenure as of [`REFERENCE_YEAR`].
    pub fn select(&self, threshold: i32) -> Vec<&Worker> {
        self.select_as_of(REFERENCE_YEAR, threshold)
    }

    pub fn select_as_of(&self, reference_year: i32, threshold: i32) -> Vec<&Worker> {
        self.workers
            .iter()
            .filter(|worker| worker.tenure(reference_year) >= threshold)
            .collect()
    }
}
