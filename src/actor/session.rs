use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::actor::model::SimulationRequest;
use crate::blueprint::model::BuildingType;
use crate::blueprint::reference::ReferenceData;
use crate::geometry::region::LatLng;
use crate::simulation::model::Placement;
use crate::simulation::report::SimulationReport;

/// Advisory outcome of a refused action. The session state is unchanged
/// whenever one of these is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    NoBuildingSelected,
    UnknownBuilding(BuildingType),
    OutsideRegion(LatLng),
    InsufficientBudget { required: u64, remaining: u64 },
    BudgetNotSpent { remaining: u64 },
    SimulationInProgress,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NoBuildingSelected => write!(f, "Please select a building first."),
            Rejection::UnknownBuilding(building_type) => {
                write!(f, "{building_type} is not available for placement.")
            }
            Rejection::OutsideRegion(_) => {
                write!(f, "You can only place buildings within the city boundary!")
            }
            Rejection::InsufficientBudget {
                required,
                remaining,
            } => write!(
                f,
                "Insufficient budget! {required} required, {remaining} remaining."
            ),
            Rejection::BudgetNotSpent { remaining } => write!(
                f,
                "Spend the remaining budget of {remaining} before simulating."
            ),
            Rejection::SimulationInProgress => write!(f, "A simulation is already running."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEntry {
    pub building_type: BuildingType,
    pub label: String,
    pub unit_cost: u64,
    pub count: usize,
    pub total_cost: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    pub entries: Vec<UsageEntry>,
    pub total_used: u64,
    pub remaining: u64,
    pub ready_to_simulate: bool,
}

/// Placement state for one planning session: budget, placed facilities and
/// the latest simulation result.
#[derive(Debug, Clone)]
pub struct Session {
    reference: Arc<ReferenceData>,
    budget: u64,
    placements: Vec<Placement>,
    initial: usize,
    selected: Option<BuildingType>,
    pending: Option<Uuid>,
    report: Option<SimulationReport>,
    require_full_budget: bool,
}

impl Session {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        let placements = reference.initial_placements.clone();
        Self {
            budget: reference.budget,
            initial: placements.len(),
            placements,
            reference,
            selected: None,
            pending: None,
            report: None,
            require_full_budget: true,
        }
    }

    pub fn with_full_budget_requirement(mut self, required: bool) -> Self {
        self.require_full_budget = required;
        self
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn budget(&self) -> u64 {
        self.budget
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Placements made during this session, excluding the initial ones.
    pub fn user_placements(&self) -> &[Placement] {
        &self.placements[self.initial..]
    }

    pub fn selected(&self) -> Option<&BuildingType> {
        self.selected.as_ref()
    }

    /// Selects a building, or clears the selection when it is already
    /// selected.
    pub fn select(
        &mut self,
        building_type: BuildingType,
    ) -> Result<Option<&BuildingType>, Rejection> {
        if !self.reference.catalog.contains(&building_type) {
            return Err(Rejection::UnknownBuilding(building_type));
        }
        if self.selected.as_ref() == Some(&building_type) {
            tracing::debug!("Deselected {}", building_type);
            self.selected = None;
        } else {
            tracing::debug!("Selected {}", building_type);
            self.selected = Some(building_type);
        }
        Ok(self.selected.as_ref())
    }

    pub fn place(&mut self, position: LatLng) -> Result<&Placement, Rejection> {
        let Some(building_type) = self.selected.clone() else {
            return Err(self.reject(Rejection::NoBuildingSelected));
        };
        let Some(entry) = self.reference.catalog.get(&building_type) else {
            return Err(self.reject(Rejection::UnknownBuilding(building_type)));
        };
        let cost = entry.unit_cost;
        if !self.reference.region.contains(position) {
            return Err(self.reject(Rejection::OutsideRegion(position)));
        }
        if self.budget < cost {
            return Err(self.reject(Rejection::InsufficientBudget {
                required: cost,
                remaining: self.budget,
            }));
        }

        self.budget -= cost;
        let placement = Placement::new(position, building_type, cost);
        tracing::info!(
            "Placed {} at ({}, {}) for {}, remaining budget {}",
            placement.building_type,
            position.lat,
            position.lng,
            cost,
            self.budget
        );
        self.placements.push(placement);
        Ok(&self.placements[self.placements.len() - 1])
    }

    fn reject(&self, rejection: Rejection) -> Rejection {
        tracing::warn!("Rejected: {}", rejection);
        rejection
    }

    pub fn usage(&self) -> UsageReport {
        let user = self.user_placements();
        let entries: Vec<UsageEntry> = self
            .reference
            .catalog
            .entries()
            .iter()
            .map(|entry| {
                let count = user
                    .iter()
                    .filter(|p| p.building_type == entry.building_type)
                    .count();
                UsageEntry {
                    building_type: entry.building_type.clone(),
                    label: entry.label.clone(),
                    unit_cost: entry.unit_cost,
                    count,
                    total_cost: entry.unit_cost * count as u64,
                }
            })
            .collect();
        let total_used = entries.iter().map(|e| e.total_cost).sum();
        UsageReport {
            entries,
            total_used,
            remaining: self.budget,
            ready_to_simulate: self.ready_to_simulate(),
        }
    }

    /// Distinct user-placed building types in catalog order.
    pub fn installed_types(&self) -> Vec<BuildingType> {
        self.usage()
            .entries
            .into_iter()
            .filter(|entry| entry.count > 0)
            .map(|entry| entry.building_type)
            .collect()
    }

    pub fn is_simulating(&self) -> bool {
        self.pending.is_some()
    }

    pub fn ready_to_simulate(&self) -> bool {
        !self.is_simulating() && (!self.require_full_budget || self.budget == 0)
    }

    /// Marks a simulation as running and returns the work for the worker.
    pub fn simulation_request(&mut self) -> Result<SimulationRequest, Rejection> {
        if self.is_simulating() {
            return Err(self.reject(Rejection::SimulationInProgress));
        }
        if self.require_full_budget && self.budget != 0 {
            return Err(self.reject(Rejection::BudgetNotSpent {
                remaining: self.budget,
            }));
        }
        let request = SimulationRequest {
            id: Uuid::new_v4(),
            placements: self.placements.clone(),
            installed: self.installed_types(),
        };
        self.pending = Some(request.id);
        tracing::info!(
            "Simulation {} requested for {} placements",
            request.id,
            request.placements.len()
        );
        Ok(request)
    }

    /// Replaces the previous report with the one for the pending request.
    /// Reports for any other request are discarded.
    pub fn apply(&mut self, report: SimulationReport) -> bool {
        if self.pending != Some(report.request_id) {
            tracing::warn!("Discarding report for stale request {}", report.request_id);
            return false;
        }
        self.pending = None;
        self.report = Some(report);
        true
    }

    /// Clears a pending request whose result will never arrive.
    pub fn abandon(&mut self, request_id: Uuid) {
        if self.pending == Some(request_id) {
            tracing::warn!("Abandoning simulation {}", request_id);
            self.pending = None;
        }
    }

    pub fn report(&self) -> Option<&SimulationReport> {
        self.report.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::report::build_report;

    fn reference() -> Arc<ReferenceData> {
        Arc::new(ReferenceData::builtin().unwrap())
    }

    fn inside() -> LatLng {
        LatLng::new(49.2488, -122.9805)
    }

    fn outside() -> LatLng {
        LatLng::new(49.3200, -123.1000)
    }

    #[test]
    fn test_place_success_deducts_budget() {
        let mut session = Session::new(reference());
        let start = session.budget();
        session.select(BuildingType::School).unwrap();
        let placement = session.place(inside()).unwrap().clone();
        assert_eq!(placement.building_type, BuildingType::School);
        assert_eq!(placement.cost, 2000);
        assert_eq!(session.budget(), start - 2000);
        assert_eq!(session.user_placements(), &[placement]);
    }

    #[test]
    fn test_place_without_selection() {
        let mut session = Session::new(reference());
        let before = session.placements().len();
        assert_eq!(session.place(inside()), Err(Rejection::NoBuildingSelected));
        assert_eq!(session.placements().len(), before);
    }

    #[test]
    fn test_place_outside_region_keeps_state() {
        let mut session = Session::new(reference());
        session.select(BuildingType::Market).unwrap();
        let budget = session.budget();
        assert_eq!(
            session.place(outside()),
            Err(Rejection::OutsideRegion(outside()))
        );
        assert_eq!(session.budget(), budget);
        assert!(session.user_placements().is_empty());
    }

    #[test]
    fn test_place_insufficient_budget_keeps_state() {
        let mut session = Session::new(reference());
        session.select(BuildingType::Hospital).unwrap();
        for _ in 0..3 {
            session.place(inside()).unwrap();
        }
        assert_eq!(session.budget(), 1000);
        assert_eq!(
            session.place(inside()),
            Err(Rejection::InsufficientBudget {
                required: 3000,
                remaining: 1000
            })
        );
        assert_eq!(session.budget(), 1000);
        assert_eq!(session.user_placements().len(), 3);
    }

    #[test]
    fn test_select_toggles_and_rejects_unknown() {
        let mut session = Session::new(reference());
        assert_eq!(
            session.select(BuildingType::Daycare).unwrap(),
            Some(&BuildingType::Daycare)
        );
        assert_eq!(session.select(BuildingType::Daycare).unwrap(), None);
        let unknown = BuildingType::Other("Stadium".into());
        assert_eq!(
            session.select(unknown.clone()),
            Err(Rejection::UnknownBuilding(unknown))
        );
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_usage_excludes_initial_placements() {
        let mut session = Session::new(reference());
        assert!(!session.placements().is_empty());
        assert_eq!(session.usage().total_used, 0);
        assert!(session.installed_types().is_empty());

        session.select(BuildingType::SeniorCentre).unwrap();
        session.place(inside()).unwrap();
        session.select(BuildingType::Market).unwrap();
        session.place(inside()).unwrap();
        session.place(inside()).unwrap();

        let usage = session.usage();
        assert_eq!(usage.total_used, 1000 + 2 * 1500);
        assert_eq!(usage.remaining, session.budget());
        let market = usage
            .entries
            .iter()
            .find(|e| e.building_type == BuildingType::Market)
            .unwrap();
        assert_eq!((market.count, market.total_cost), (2, 3000));
        assert_eq!(
            session.installed_types(),
            vec![BuildingType::Market, BuildingType::SeniorCentre]
        );
    }

    #[test]
    fn test_simulation_requires_spent_budget() {
        let mut session = Session::new(reference());
        assert!(!session.ready_to_simulate());
        assert!(!session.usage().ready_to_simulate);
        assert_eq!(
            session.simulation_request().unwrap_err(),
            Rejection::BudgetNotSpent { remaining: 10_000 }
        );

        session.select(BuildingType::School).unwrap();
        for _ in 0..5 {
            session.place(inside()).unwrap();
        }
        assert_eq!(session.budget(), 0);
        assert!(session.ready_to_simulate());
        assert!(session.usage().ready_to_simulate);
        let request = session.simulation_request().unwrap();
        assert!(!session.usage().ready_to_simulate);
        assert_eq!(request.placements.len(), session.placements().len());
        assert_eq!(request.installed, vec![BuildingType::School]);
        assert!(session.is_simulating());
        assert_eq!(
            session.simulation_request().unwrap_err(),
            Rejection::SimulationInProgress
        );
    }

    #[test]
    fn test_apply_replaces_previous_report() {
        let reference = reference();
        let mut session = Session::new(reference.clone()).with_full_budget_requirement(false);

        let first = session.simulation_request().unwrap();
        let report = build_report(&reference, first.id, &first.placements, &first.installed);
        assert!(session.apply(report));
        assert!(!session.is_simulating());

        session.select(BuildingType::PoliceStation).unwrap();
        session.place(inside()).unwrap();
        let second = session.simulation_request().unwrap();
        let report = build_report(&reference, second.id, &second.placements, &second.installed);
        assert!(session.apply(report));
        assert_eq!(session.report().unwrap().request_id, second.id);
        assert_eq!(session.report().unwrap().series.len(), 25);
    }

    #[test]
    fn test_apply_discards_stale_report() {
        let reference = reference();
        let mut session = Session::new(reference.clone()).with_full_budget_requirement(false);
        let request = session.simulation_request().unwrap();
        let stale = build_report(&reference, Uuid::new_v4(), &request.placements, &[]);
        assert!(!session.apply(stale));
        assert!(session.is_simulating());
        assert!(session.report().is_none());
    }
}
