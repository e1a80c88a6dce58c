use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};

use crate::actor::model::{ResponseSignal, SimulationRequest};
use crate::blueprint::reference::ReferenceData;
use crate::simulation::report::{SimulationReport, build_report};

pub const DEFAULT_MIN_DURATION: Duration = Duration::from_millis(1500);

/// Runs simulations after a minimum presentation delay. The computation
/// itself is synchronous and only reads the shared reference data.
#[derive(Clone, Debug)]
pub struct SimulationWorker {
    reference: Arc<ReferenceData>,
    min_duration: Duration,
}

impl SimulationWorker {
    pub fn new(reference: Arc<ReferenceData>, min_duration: Duration) -> Self {
        Self {
            reference,
            min_duration,
        }
    }

    pub async fn run(&self, request: SimulationRequest) -> SimulationReport {
        let started = Instant::now();
        tracing::debug!(
            "Simulation {} waiting {:?} before computing",
            request.id,
            self.min_duration
        );
        tokio::time::sleep(self.min_duration).await;

        let report = build_report(
            &self.reference,
            request.id,
            &request.placements,
            &request.installed,
        );
        tracing::info!(
            "Simulation {} finished in {:?}",
            request.id,
            started.elapsed()
        );
        report
    }

    /// Spawns the simulation and reports progress on `respond_to`.
    pub fn submit(
        &self,
        request: SimulationRequest,
        respond_to: mpsc::Sender<ResponseSignal>,
    ) -> JoinHandle<()> {
        let worker = self.clone();
        tokio::spawn(async move {
            let id = request.id;
            if respond_to.send(ResponseSignal::Started(id)).await.is_err() {
                tracing::warn!("Receiver for simulation {} dropped before start", id);
                return;
            }
            let report = worker.run(request).await;
            respond_to
                .send(ResponseSignal::Completed(Box::new(report)))
                .await
                .map_err(|e| tracing::error!("Failed to send response: {}", e))
                .ok();
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::model::BuildingType;
    use crate::geometry::region::LatLng;
    use crate::simulation::model::Placement;
    use uuid::Uuid;

    fn worker(delay_ms: u64) -> SimulationWorker {
        SimulationWorker::new(
            Arc::new(ReferenceData::builtin().unwrap()),
            Duration::from_millis(delay_ms),
        )
    }

    fn request() -> SimulationRequest {
        SimulationRequest {
            id: Uuid::new_v4(),
            placements: vec![Placement::new(
                LatLng::new(49.25, -122.98),
                BuildingType::School,
                2000,
            )],
            installed: vec![BuildingType::School],
        }
    }

    #[tokio::test]
    async fn test_run_waits_minimum_duration() {
        let worker = worker(100);
        let started = Instant::now();
        let report = worker.run(request()).await;
        assert!(started.elapsed() >= Duration::from_millis(100));
        assert_eq!(report.series.len(), 25);
    }

    #[tokio::test]
    async fn test_submit_signals_start_then_completion() {
        let worker = worker(10);
        let request = request();
        let id = request.id;
        let (tx, mut rx) = mpsc::channel(4);

        let handle = worker.submit(request, tx);

        match rx.recv().await {
            Some(ResponseSignal::Started(started)) => assert_eq!(started, id),
            other => panic!("expected start signal, got {:?}", other),
        }
        match rx.recv().await {
            Some(ResponseSignal::Completed(report)) => {
                assert_eq!(report.request_id, id);
                assert!(report.facility_summary.contains("School"));
            }
            other => panic!("expected completion, got {:?}", other),
        }
        handle.await.unwrap();
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_repeated_runs_are_identical() {
        let worker = worker(0);
        let request = request();
        let first = worker.run(request.clone()).await;
        let second = worker.run(request).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_submit_with_dropped_receiver() {
        let worker = worker(0);
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        worker.submit(request(), tx).await.unwrap();
    }
}
