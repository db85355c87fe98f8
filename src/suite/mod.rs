use indicatif::{ProgressBar, ProgressStyle};

use crate::output::{ProbeSet, SuiteReport};
use crate::probes::{
    balance::BalanceProbe, connectivity::ConnectivityProbe, esim::EsimProbe, sms::SmsProbe,
    voice::VoiceProbe, Probe, ProbeContext, ProbeResult,
};

/// Runs the probe suite in fixed order
///
/// connectivity -> balance -> sms -> voice -> esim. SMS and voice are never
/// omitted: without a destination phone they fail immediately with a fixed
/// error, so the report always carries all five results.
pub struct SuiteRunner {
    ctx: ProbeContext,
    quiet: bool,
    paced: bool,
}

impl SuiteRunner {
    pub fn new(ctx: ProbeContext) -> Self {
        Self {
            ctx,
            quiet: false,
            paced: true,
        }
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Disable the inter-probe pauses. Intended for tests running against a
    /// local mock server.
    pub fn without_pacing(mut self) -> Self {
        self.paced = false;
        self
    }

    /// Run all five probes to completion and build the report
    pub async fn run(&self) -> SuiteReport {
        let progress = if !self.quiet {
            let pb = ProgressBar::new(5);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("##-"),
            );
            Some(pb)
        } else {
            None
        };

        let connectivity = self.step(&ConnectivityProbe, progress.as_ref()).await;
        let balance = self.step(&BalanceProbe, progress.as_ref()).await;
        let sms = self.step(&SmsProbe, progress.as_ref()).await;
        let voice = self.step(&VoiceProbe, progress.as_ref()).await;
        let esim = self.step(&EsimProbe, progress.as_ref()).await;

        if let Some(pb) = progress {
            pb.finish_with_message("Complete");
        }

        SuiteReport::new(ProbeSet {
            connectivity,
            balance,
            sms,
            voice,
            esim,
        })
    }

    async fn step(&self, probe: &dyn Probe, progress: Option<&ProgressBar>) -> ProbeResult {
        if let Some(pb) = progress {
            pb.set_message(probe.name().to_string());
        }

        let result = probe.run(&self.ctx).await;

        if let Some(pb) = progress {
            pb.inc(1);
        }

        // A probe that never touched the network (missing phone or outbound
        // number) needs no pause.
        if self.paced && result.duration_ms > 0 {
            tokio::time::sleep(probe.cooldown()).await;
        }

        result
    }
}
