//! One artist search, from job input to report delivery.
//!
//! [`scan`] runs every configured source in turn and stops at the first
//! fatal error. [`run_job`] wraps it with the notification policy: a report
//! when placements were found, a "no tracks found" message when the scan
//! completed empty, and exactly one error message when it could not
//! complete.

use crate::{
    Error, Result,
    apple::{AppleMusicClient, catalog::playlist_refs},
    charts::{FileChartSource, chart_refs},
    config::Config,
    info,
    management::CatalogWalker,
    notify::{Notifier, deliver},
    spotify::SpotifyClient,
    success,
    types::{Job, Report},
    utils,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Completed { report: Report, message: String },
    NoMatches { message: String },
    Failed { message: String },
}

impl JobOutcome {
    pub fn status_code(&self) -> u16 {
        match self {
            JobOutcome::Completed { .. } | JobOutcome::NoMatches { .. } => 200,
            JobOutcome::Failed { .. } => 500,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            JobOutcome::Completed { .. } => 0,
            JobOutcome::NoMatches { .. } => 2,
            JobOutcome::Failed { .. } => 1,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            JobOutcome::Completed { message, .. }
            | JobOutcome::NoMatches { message }
            | JobOutcome::Failed { message } => message,
        }
    }

    pub fn report(&self) -> Option<&Report> {
        match self {
            JobOutcome::Completed { report, .. } => Some(report),
            _ => None,
        }
    }
}

pub async fn run_job<N: Notifier>(config: &Config, job: &Job, notifier: &N) -> JobOutcome {
    let today = utils::today();
    info!("Starting search for {}", job.artist);

    match scan(config, job).await {
        Ok(report) if report.is_empty() => {
            let body = format!("No tracks found for {}", job.artist);
            info!("{}", body);
            deliver(notifier, &utils::report_subject(&job.artist, today), &body).await;
            JobOutcome::NoMatches {
                message: "No tracks found".to_string(),
            }
        }
        Ok(report) => {
            success!("Found {} placement(s) for {}", report.count(), job.artist);
            let body = utils::render_report_body(&report);
            deliver(notifier, &utils::report_subject(&job.artist, today), &body).await;
            JobOutcome::Completed {
                report,
                message: "Execution completed successfully".to_string(),
            }
        }
        Err(e) => {
            let body = format!("An error occurred while searching for {}: {}", job.artist, e);
            deliver(notifier, &utils::error_subject(&job.artist, today), &body).await;
            JobOutcome::Failed {
                message: format!("Error occurred while searching for artist: {e}"),
            }
        }
    }
}

/// Loads a job file (`-` for stdin) and runs it. A job that cannot be read
/// is reported through the notifier like any other failure.
pub async fn run_job_file<N: Notifier>(config: &Config, path: &str, notifier: &N) -> JobOutcome {
    match load_job(path).await {
        Ok(job) => run_job(config, &job, notifier).await,
        Err(e) => {
            let body = format!("Cannot read job {path}: {e}");
            deliver(notifier, &utils::error_subject(path, utils::today()), &body).await;
            JobOutcome::Failed { message: body }
        }
    }
}

/// Scans every source named by the job and collects the placements.
pub async fn scan(config: &Config, job: &Job) -> Result<Report> {
    if job.artist.trim().is_empty() {
        return Err(Error::Configuration("job has no artist name".to_string()));
    }
    if job.is_empty() {
        return Err(Error::Configuration(format!(
            "nothing to scan for {}: no Spotify categories, Apple playlists or charts given",
            job.artist
        )));
    }

    let mut report = Report::default();

    if !job.genres.spotify.is_empty() {
        let spotify = config.spotify.as_ref().ok_or_else(|| {
            Error::Configuration(
                "Spotify categories requested but Spotify is not configured".to_string(),
            )
        })?;
        let client = SpotifyClient::new(spotify, &config.http)?;
        let mut walker = CatalogWalker::new(client, config.scan.clone());

        for category in &job.genres.spotify {
            info!("Getting playlists from {}", category);
            walker
                .find_playlists_for_category(category, &spotify.country)
                .await?;
            info!(
                "Searching {} playlists in {}",
                walker.playlists().len(),
                category
            );
            let found = walker.find_artist_in_playlists(&job.artist).await?;
            if found.is_empty() {
                info!("No tracks found for {} in {}", job.artist, category);
            }
            report.add(&job.artist, found);
        }
    }

    if !job.genres.apple.is_empty() {
        let apple = config.apple.as_ref().ok_or_else(|| {
            Error::Configuration(
                "Apple Music playlists requested but Apple Music is not configured".to_string(),
            )
        })?;
        let client = AppleMusicClient::new(apple, &config.http)?;
        let mut walker = CatalogWalker::new(client, config.scan.clone());
        walker.set_playlists(playlist_refs(&job.genres.apple));

        info!("Searching {} Apple Music playlists", job.genres.apple.len());
        let found = walker.find_artist_in_playlists(&job.artist).await?;
        report.add(&job.artist, found);
    }

    if !job.charts.is_empty() {
        let mut walker = CatalogWalker::new(FileChartSource, config.scan.clone());
        walker.set_playlists(chart_refs(&job.charts));

        info!("Checking {} chart(s)", job.charts.len());
        let found = walker.find_artist_in_playlists(&job.artist).await?;
        report.add(&job.artist, found);
    }

    Ok(report)
}

/// Reads a job from a JSON file, or from stdin when `path` is `-`.
pub async fn load_job(path: &str) -> Result<Job> {
    let content = if path == "-" {
        use tokio::io::AsyncReadExt;
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        buf
    } else {
        async_fs::read_to_string(path).await?
    };

    serde_json::from_str(&content).map_err(|source| Error::Decode {
        url: path.to_string(),
        source,
    })
}
