// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

/// Creates a connected keyword input and debouncer.
pub fn keyword_channel(delay: Duration) -> (KeywordInput, KeywordDebouncer) {
    let (tx, rx) = watch::channel(String::new());
    (KeywordInput { tx }, KeywordDebouncer { rx, delay, last: None })
}

/// Write side: called on every keystroke.
#[derive(Debug)]
pub struct KeywordInput {
    tx: watch::Sender<String>,
}

impl KeywordInput {
    /// Replaces the pending keyword. Never blocks; earlier unsettled keywords are overwritten.
    pub fn send(&self, keyword: impl Into<String>) {
        self.tx.send_replace(keyword.into());
    }
}

/// Read side: yields a keyword once it has stopped changing for `delay`.
#[derive(Debug)]
pub struct KeywordDebouncer {
    rx: watch::Receiver<String>,
    delay: Duration,
    last: Option<String>,
}

impl KeywordDebouncer {
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits for the next settled keyword.
    ///
    /// A keyword equal to the previously settled one is swallowed. Returns `None` once the
    /// input is dropped and nothing is left to settle.
    pub async fn settled(&mut self) -> Option<String> {
        loop {
            if self.rx.changed().await.is_err() {
                return None;
            }

            loop {
                match time::timeout(self.delay, self.rx.changed()).await {
                    Ok(Ok(())) => continue,
                    // Input dropped: the latest keyword is final.
                    Ok(Err(_)) | Err(_) => break,
                }
            }

            let keyword = self.rx.borrow_and_update().clone();
            if self.last.as_deref() == Some(keyword.as_str()) {
                continue;
            }
            self.last = Some(keyword.clone());
            return Some(keyword);
        }
    }
}
