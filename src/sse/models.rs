#[derive(Debug, Clone, PartialEq)]
pub enum SseEvent {
    CandidateCreated(i64),
    VotesUpdated { candidate_id: i64, votes: i64 },
}

pub type SseSender = tokio::sync::broadcast::Sender<SseEvent>;
