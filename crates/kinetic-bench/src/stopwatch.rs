// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use std::time::{Duration, Instant};

/// A restartable wall-clock meter for one timed interval at a time.
///
/// `start` records a reference instant, `stop` captures the elapsed time
/// since the matching `start`. The captured interval stays available until
/// the next `stop`. A `stop` without a preceding `start` leaves the last
/// capture untouched; nothing here can fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stopwatch {
    started: Option<Instant>,
    last: Duration,
}

impl Stopwatch {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    #[inline]
    pub fn stop(&mut self) {
        if let Some(started) = self.started.take() {
            self.last = started.elapsed();
        }
    }

    /// The most recently captured interval.
    #[inline]
    pub fn last(&self) -> Duration {
        self.last
    }

    /// The most recently captured interval in milliseconds.
    #[inline]
    pub fn last_ms(&self) -> f64 {
        self.last.as_secs_f64() * 1e3
    }
}
