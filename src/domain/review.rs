//! Review session: the approval queue and its audit trail.
//!
//! Owned by the caller for the lifetime of one interactive session; nothing
//! here survives a restart.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use super::error::PricedeskError;
use super::pricing::{ApprovalLevel, Recommendation, RecommendationStatus};

/// A reviewer's verdict on a pending recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    fn target_status(&self) -> RecommendationStatus {
        match self {
            Decision::Approve => RecommendationStatus::Approved,
            Decision::Reject => RecommendationStatus::Rejected,
        }
    }
}

/// Immutable record of one status transition. Append-only.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditLogEntry {
    pub recommendation_id: u64,
    pub sku: String,
    pub actor: String,
    pub decided_at: NaiveDateTime,
    pub from_status: RecommendationStatus,
    pub to_status: RecommendationStatus,
    pub note: String,
}

/// Per-level pending counts for the workflow view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkflowStats {
    pub auto: usize,
    pub manager: usize,
    pub director: usize,
    pub executive: usize,
}

/// Totals over decided recommendations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecisionStats {
    pub approved: usize,
    pub rejected: usize,
}

/// In-memory queue of recommendations plus the append-only audit log.
#[derive(Debug, Default)]
pub struct ReviewSession {
    recommendations: BTreeMap<u64, Recommendation>,
    audit_log: Vec<AuditLogEntry>,
    next_id: u64,
}

impl ReviewSession {
    pub fn new() -> Self {
        ReviewSession {
            recommendations: BTreeMap::new(),
            audit_log: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a recommendation to the queue, assigning its id.
    pub fn submit(&mut self, mut recommendation: Recommendation) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        recommendation.id = id;
        recommendation.status = RecommendationStatus::Pending;
        self.recommendations.insert(id, recommendation);
        id
    }

    pub fn get(&self, id: u64) -> Option<&Recommendation> {
        self.recommendations.get(&id)
    }

    pub fn len(&self) -> usize {
        self.recommendations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }

    /// Apply a decision to a pending recommendation.
    ///
    /// Fails with `NotFound` for an unknown id and `AlreadyDecided` once a
    /// recommendation has reached a terminal status; neither failure touches
    /// state or the audit log. A successful decision appends exactly one
    /// audit entry.
    pub fn decide(
        &mut self,
        id: u64,
        decision: Decision,
        actor: &str,
        note: &str,
        at: NaiveDateTime,
    ) -> Result<&Recommendation, PricedeskError> {
        let recommendation = self
            .recommendations
            .get_mut(&id)
            .ok_or(PricedeskError::NotFound { id })?;

        if recommendation.status.is_terminal() {
            return Err(PricedeskError::AlreadyDecided {
                id,
                status: recommendation.status,
            });
        }

        let from_status = recommendation.status;
        recommendation.status = decision.target_status();

        self.audit_log.push(AuditLogEntry {
            recommendation_id: id,
            sku: recommendation.sku.clone(),
            actor: actor.to_string(),
            decided_at: at,
            from_status,
            to_status: recommendation.status,
            note: note.to_string(),
        });

        Ok(&self.recommendations[&id])
    }

    /// Every recommendation in id order, regardless of status.
    pub fn recommendations(&self) -> Vec<&Recommendation> {
        self.recommendations.values().collect()
    }

    /// Pending recommendations in id order.
    pub fn pending(&self) -> Vec<&Recommendation> {
        self.recommendations
            .values()
            .filter(|r| r.status == RecommendationStatus::Pending)
            .collect()
    }

    /// Pending recommendations requiring a given sign-off level.
    pub fn pending_for_level(&self, level: ApprovalLevel) -> Vec<&Recommendation> {
        self.recommendations
            .values()
            .filter(|r| r.status == RecommendationStatus::Pending && r.approval_level == level)
            .collect()
    }

    /// Decided recommendations in id order.
    pub fn decided(&self) -> Vec<&Recommendation> {
        self.recommendations
            .values()
            .filter(|r| r.status.is_terminal())
            .collect()
    }

    /// The audit trail, oldest first.
    pub fn history(&self) -> &[AuditLogEntry] {
        &self.audit_log
    }

    pub fn workflow_stats(&self) -> WorkflowStats {
        let mut stats = WorkflowStats::default();
        for r in self.pending() {
            match r.approval_level {
                ApprovalLevel::Auto => stats.auto += 1,
                ApprovalLevel::Manager => stats.manager += 1,
                ApprovalLevel::Director => stats.director += 1,
                ApprovalLevel::Executive => stats.executive += 1,
            }
        }
        stats
    }

    pub fn decision_stats(&self) -> DecisionStats {
        let mut stats = DecisionStats::default();
        for r in self.recommendations.values() {
            match r.status {
                RecommendationStatus::Approved => stats.approved += 1,
                RecommendationStatus::Rejected => stats.rejected += 1,
                RecommendationStatus::Pending => {}
            }
        }
        stats
    }
}
