// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

fn env_i32(name: &str, default: i32) -> i32 {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<i32>().ok()).unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<usize>().ok()).unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<u64>().ok()).unwrap_or(default)
}

/// Criterion tuned through `CANOPY_BENCH_*` variables, with a flamegraph profiler attached.
pub fn criterion() -> Criterion {
    let frequency = env_i32("CANOPY_PROFILE_FREQ", 100).clamp(1, 1000);
    let sample_size = env_usize("CANOPY_BENCH_SAMPLE_SIZE", 40).clamp(10, 200);
    let warmup_secs = env_u64("CANOPY_BENCH_WARMUP_SECS", 2).clamp(1, 60);
    let measurement_secs = env_u64("CANOPY_BENCH_MEASUREMENT_SECS", 4).clamp(1, 120);

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_secs(warmup_secs))
        .measurement_time(Duration::from_secs(measurement_secs))
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
