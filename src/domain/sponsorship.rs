//! Sponsorship matching.
//!
//! A project is sponsored by organization `O` when at least one professor whose
//! profile organization equals `O` has declared interest in it. Comparison is
//! exact: no trimming, no case folding. An unset or empty organization never
//! sponsors anything.

use std::collections::{HashMap, HashSet};

use super::entities::{InterestWithProfile, Project, ProjectId, Role};

/// Decides sponsorship for one requester organization.
#[derive(Debug, Clone, Copy)]
pub struct SponsorshipMatcher<'a> {
    organization: Option<&'a str>,
}

impl<'a> SponsorshipMatcher<'a> {
    pub fn new(organization: Option<&'a str>) -> Self {
        Self {
            organization: organization.filter(|org| !org.is_empty()),
        }
    }

    /// The organization being matched, or `None` when nothing can match.
    pub fn organization(&self) -> Option<&'a str> {
        self.organization
    }

    /// Returns true if this single interest sponsors its project.
    pub fn matches(&self, interest: &InterestWithProfile) -> bool {
        let Some(org) = self.organization else {
            return false;
        };

        interest.profile.as_ref().is_some_and(|user| {
            user.role == Role::Professor && user.organization.as_deref() == Some(org)
        })
    }

    /// Scans a project's interests, stopping at the first match.
    pub fn is_sponsored(&self, interests: &[InterestWithProfile]) -> bool {
        self.organization.is_some() && interests.iter().any(|i| self.matches(i))
    }

    /// Keeps the candidates whose interests contain a match, in candidate order.
    ///
    /// Projects missing from `interests` have no interest records and are
    /// therefore never sponsored.
    pub fn filter(
        &self,
        candidates: &[Project],
        interests: &HashMap<ProjectId, Vec<InterestWithProfile>>,
    ) -> Vec<Project> {
        if self.organization.is_none() {
            return Vec::new();
        }

        candidates
            .iter()
            .filter(|p| {
                interests
                    .get(&p.id)
                    .is_some_and(|records| self.is_sponsored(records))
            })
            .cloned()
            .collect()
    }

    /// Keeps the candidates whose id is in `sponsored`, in candidate order.
    ///
    /// Used with ids computed by the store in a single join.
    pub fn retain(&self, candidates: &[Project], sponsored: &HashSet<ProjectId>) -> Vec<Project> {
        if self.organization.is_none() {
            return Vec::new();
        }

        candidates
            .iter()
            .filter(|p| sponsored.contains(&p.id))
            .cloned()
            .collect()
    }
}
