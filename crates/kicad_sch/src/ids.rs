use uuid::Uuid;

/// Source of the unique identifiers stamped on document items.
pub trait IdSource {
    fn next_id(&mut self) -> Uuid;
}

/// Fresh random v4 identifiers.
#[derive(Debug, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Identifiers counting up from 1, for reproducible output.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> Uuid {
        self.next += 1;
        Uuid::from_u128(self.next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_are_stable() {
        let mut ids = SequentialIds::new();
        assert_eq!(
            ids.next_id().to_string(),
            "00000000-0000-0000-0000-000000000001"
        );
        assert_eq!(
            ids.next_id().to_string(),
            "00000000-0000-0000-0000-000000000002"
        );
    }

    #[test]
    fn random_ids_differ() {
        let mut ids = RandomIds;
        assert_ne!(ids.next_id(), ids.next_id());
    }
}
