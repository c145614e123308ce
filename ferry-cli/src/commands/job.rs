//! Job command handlers
//!
//! Handles starting, inspecting and listing orchestrator jobs.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use ferry_client::{PollOutcome, RunnerSettings, TestRunner};
use ferry_core::domain::job::{JobFilter, JobRecord, JobRequest, JobStatus};
use serde_json::Value;
use tokio::time::Instant;

use super::{parse_key_val, print_json};
use crate::config::Config;

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// Start a job for a process
    Start {
        /// Process key
        process_key: String,

        /// Robot that must run the job
        #[arg(short, long)]
        robot: Option<String>,

        /// Input arguments as key=value pairs (e.g., month=3 customer=ACME)
        #[arg(short = 'a', long = "arg", value_parser = parse_key_val)]
        args: Vec<(String, Value)>,

        /// Poll the job until it finishes
        #[arg(short, long)]
        wait: bool,

        /// Seconds to wait before giving up
        #[arg(long, default_value_t = 60)]
        timeout: u64,
    },
    /// Get job details
    Get {
        /// Job ID
        id: String,
    },
    /// List jobs
    List {
        /// Only jobs of this process
        #[arg(short, long)]
        process_key: Option<String>,

        /// Only jobs in this status (Pending, Running, Successful, Faulted, Stopped)
        #[arg(short, long)]
        status: Option<JobStatus>,
    },
}

/// Handle job commands
///
/// Routes job subcommands to their respective handlers.
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    match command {
        JobCommands::Start {
            process_key,
            robot,
            args,
            wait,
            timeout,
        } => {
            let request = JobRequest {
                process_key,
                robot_name: robot,
                input_arguments: args.into_iter().collect(),
            };
            let wait = wait.then(|| Duration::from_secs(timeout));
            start_job(config, request, wait).await
        }
        JobCommands::Get { id } => get_job(config, &id).await,
        JobCommands::List {
            process_key,
            status,
        } => list_jobs(config, JobFilter { process_key, status }).await,
    }
}

/// Start a job, optionally following it until it is terminal
async fn start_job(config: &Config, request: JobRequest, wait: Option<Duration>) -> Result<()> {
    let gateway = config.gateway()?;
    let process_key = request.process_key.clone();
    let job = gateway
        .start_job(request)
        .await
        .with_context(|| format!("Failed to start job for {}", process_key))?;

    let Some(timeout) = wait else {
        if config.json {
            return print_json(&job);
        }
        println!("{}", "✓ Job started successfully!".green().bold());
        print_job_details(&job);
        return Ok(());
    };

    if !config.json {
        println!(
            "{} Job {} started, waiting for it to finish...",
            "▸".cyan(),
            job.job_id.cyan()
        );
    }

    let runner = TestRunner::with_settings(
        gateway,
        RunnerSettings {
            deadline: timeout,
            ..Default::default()
        },
    );
    let outcome = runner
        .poll_until_terminal(job, Instant::now() + timeout)
        .await
        .context("Failed to poll job status")?;

    match outcome {
        PollOutcome::Finished(job) => {
            if config.json {
                return print_json(&job);
            }
            print_job_details(&job);
            Ok(())
        }
        PollOutcome::TimedOut(job) => {
            if config.json {
                print_json(&job)?;
            } else {
                print_job_details(&job);
            }
            anyhow::bail!(
                "Job {} did not finish within {} seconds",
                job.job_id,
                timeout.as_secs()
            )
        }
    }
}

/// Get and display a single job
async fn get_job(config: &Config, id: &str) -> Result<()> {
    let job = config.gateway()?.get_job_status(id).await?;

    if config.json {
        return print_json(&job);
    }
    print_job_details(&job);

    Ok(())
}

/// List jobs matching a filter
async fn list_jobs(config: &Config, filter: JobFilter) -> Result<()> {
    let jobs = config.gateway()?.list_jobs(&filter).await?;

    if config.json {
        return print_json(&jobs);
    }

    if jobs.is_empty() {
        println!("{}", "No jobs found.".yellow());
    } else {
        println!("{}", format!("Found {} job(s):", jobs.len()).bold());
        println!();
        for job in jobs {
            print_job_summary(&job);
        }
    }

    Ok(())
}

/// Print a one-block job summary
fn print_job_summary(job: &JobRecord) {
    println!("  {} Job {}", "▸".cyan(), job.job_id.dimmed());
    println!("    Process:  {}", job.process_key.dimmed());
    println!("    Status:   {}", colorize_status(job.status));
    println!(
        "    Created:  {}",
        job.created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    println!();
}

/// Print detailed job information
fn print_job_details(job: &JobRecord) {
    println!("{}", "Job Details:".bold());
    println!("  ID:        {}", job.job_id.cyan());
    println!("  Process:   {}", job.process_key);
    println!("  Status:    {}", colorize_status(job.status));
    println!("  Created:   {}", job.created_at.format("%Y-%m-%d %H:%M:%S"));

    if let Some(started) = job.started_at {
        println!("  Started:   {}", started.format("%Y-%m-%d %H:%M:%S"));
    }

    if let Some(ended) = job.ended_at {
        println!("  Ended:     {}", ended.format("%Y-%m-%d %H:%M:%S"));

        if let Some(started) = job.started_at {
            let seconds = ended.signed_duration_since(started).num_seconds();
            println!("  Duration:  {}s", seconds);
        }
    }

    if let Some(info) = &job.info {
        println!("  Info:      {}", info.dimmed());
    }

    if let Some(output) = &job.output_arguments {
        println!("\n{}", "Output:".bold());
        match serde_json::to_string_pretty(output) {
            Ok(pretty) => println!("{}", pretty),
            Err(_) => println!("{:?}", output),
        }
    }
}

/// Colorize job status for display
fn colorize_status(status: JobStatus) -> ColoredString {
    let status_str = status.as_str();
    match status {
        JobStatus::Pending => status_str.yellow(),
        JobStatus::Running => status_str.cyan(),
        JobStatus::Successful => status_str.green(),
        JobStatus::Faulted => status_str.red(),
        JobStatus::Stopped => status_str.dimmed(),
    }
}
