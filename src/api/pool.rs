// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use log::trace;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;
use std::thread;

/// Bounded worker pool that caps concurrent calls per remote host.
#[derive(Debug, Clone, Copy)]
pub struct HostPool {
    workers_per_host: usize,
}

impl HostPool {
    pub fn new(workers_per_host: usize) -> Self {
        Self {
            workers_per_host: workers_per_host.max(1),
        }
    }

    pub fn workers_per_host(&self) -> usize {
        self.workers_per_host
    }

    /// Runs `task` for every item. Items are grouped by the host returned from `url_of`
    /// and each group is drained by at most `workers_per_host` threads.
    ///
    /// Results are returned in input order.
    pub fn map<T, R, U, F>(&self, items: Vec<T>, url_of: U, task: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        U: Fn(&T) -> String,
        F: Fn(T) -> R + Sync,
    {
        let total = items.len();
        let mut queues: BTreeMap<String, VecDeque<(usize, T)>> = BTreeMap::new();
        for (index, item) in items.into_iter().enumerate() {
            let host = host_of(&url_of(&item));
            queues.entry(host).or_default().push_back((index, item));
        }

        let results: Mutex<Vec<Option<R>>> = Mutex::new((0..total).map(|_| None).collect());
        let queues: Vec<(String, Mutex<VecDeque<(usize, T)>>)> = queues
            .into_iter()
            .map(|(host, queue)| (host, Mutex::new(queue)))
            .collect();

        thread::scope(|scope| {
            for (host, queue) in &queues {
                let pending = queue.lock().unwrap_or_else(|e| e.into_inner()).len();
                let workers = self.workers_per_host.min(pending);
                trace!("Probing {pending} URLs on {host} with {workers} workers");

                for _ in 0..workers {
                    let task = &task;
                    let results = &results;
                    scope.spawn(move || {
                        loop {
                            let next = queue.lock().unwrap_or_else(|e| e.into_inner()).pop_front();
                            let Some((index, item)) = next else {
                                break;
                            };
                            let result = task(item);
                            results.lock().unwrap_or_else(|e| e.into_inner())[index] = Some(result);
                        }
                    });
                }
            }
        });

        results
            .into_inner()
            .unwrap_or_else(|e| e.into_inner())
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Lowercased `host[:port]` of a URL, or the whole input when it has no scheme.
pub fn host_of(url: &str) -> String {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let authority = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    host.to_lowercase()
}
