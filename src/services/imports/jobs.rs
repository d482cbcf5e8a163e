//! 后台导入任务登记表

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::models::imports::{ImportJobStatus, ImportPlan, ImportProgressResponse, ImportTally};

// 已完成任务保留时长
const FINISHED_JOB_RETENTION_MINUTES: i64 = 60;

#[derive(Debug, Clone)]
struct ImportJob {
    teacher_id: i64,
    plan: ImportPlan,
    tally: ImportTally,
    status: ImportJobStatus,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct ImportJobs {
    jobs: DashMap<Uuid, ImportJob>,
}

impl ImportJobs {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记新任务，顺带清理过期的已完成任务
    pub fn start(&self, teacher_id: i64, plan: ImportPlan) -> Uuid {
        self.prune(Utc::now());

        let job_id = Uuid::new_v4();
        self.jobs.insert(
            job_id,
            ImportJob {
                teacher_id,
                plan,
                tally: ImportTally::default(),
                status: ImportJobStatus::Running,
                started_at: Utc::now(),
                finished_at: None,
            },
        );
        job_id
    }

    pub fn record(&self, job_id: Uuid, tally: ImportTally) {
        if let Some(mut job) = self.jobs.get_mut(&job_id) {
            job.tally = tally;
        }
    }

    pub fn finish(&self, job_id: Uuid, tally: ImportTally) {
        if let Some(mut job) = self.jobs.get_mut(&job_id) {
            job.tally = tally;
            job.status = ImportJobStatus::Done;
            job.finished_at = Some(Utc::now());
        }
    }

    /// 只有发起导入的教师可见
    pub fn snapshot(&self, job_id: Uuid, teacher_id: i64) -> Option<ImportProgressResponse> {
        let job = self.jobs.get(&job_id)?;
        if job.teacher_id != teacher_id {
            return None;
        }
        Some(ImportProgressResponse {
            job_id: job_id.to_string(),
            status: job.status,
            plan: job.plan,
            tally: job.tally,
            started_at: job.started_at,
            finished_at: job.finished_at,
        })
    }

    fn prune(&self, now: DateTime<Utc>) {
        let retention = Duration::minutes(FINISHED_JOB_RETENTION_MINUTES);
        self.jobs
            .retain(|_, job| job.finished_at.is_none_or(|finished| now - finished < retention));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_lifecycle() {
        let jobs = ImportJobs::new();
        let plan = ImportPlan {
            insert: 3,
            update: 1,
        };
        let id = jobs.start(7, plan);

        let snapshot = jobs.snapshot(id, 7).unwrap();
        assert_eq!(snapshot.status, ImportJobStatus::Running);
        assert_eq!(snapshot.plan, plan);
        assert!(snapshot.finished_at.is_none());

        let tally = ImportTally {
            inserted: 3,
            updated: 1,
            failed: 0,
            progress: 100,
        };
        jobs.record(id, ImportTally { progress: 70, ..tally });
        assert_eq!(jobs.snapshot(id, 7).unwrap().tally.progress, 70);

        jobs.finish(id, tally);
        let snapshot = jobs.snapshot(id, 7).unwrap();
        assert_eq!(snapshot.status, ImportJobStatus::Done);
        assert_eq!(snapshot.tally, tally);
        assert!(snapshot.finished_at.is_some());
    }

    #[test]
    fn test_job_hidden_from_other_teachers() {
        let jobs = ImportJobs::new();
        let id = jobs.start(1, ImportPlan::default());
        assert!(jobs.snapshot(id, 2).is_none());
        assert!(jobs.snapshot(Uuid::new_v4(), 1).is_none());
    }

    #[test]
    fn test_prune_keeps_running_jobs() {
        let jobs = ImportJobs::new();
        let running = jobs.start(1, ImportPlan::default());
        let done = jobs.start(1, ImportPlan::default());
        jobs.finish(done, ImportTally::default());

        jobs.prune(Utc::now() + Duration::minutes(FINISHED_JOB_RETENTION_MINUTES + 1));

        assert!(jobs.snapshot(running, 1).is_some());
        assert!(jobs.snapshot(done, 1).is_none());
    }
}
