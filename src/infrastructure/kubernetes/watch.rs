// Copyright 2025 JiangLong.
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

//! Turns raw pod watch events into status events, resuming the watch when
//! the server closes it

use crate::domain::pod::PodStatusEvent;
use futures::stream::{self, BoxStream};
use futures::{Future, Stream, StreamExt};
use k8s_openapi::api::core::v1::Pod;
use kube::api::WatchEvent;
use tracing::{debug, info, warn};

/// One watch connection's raw events
pub type RawEvents = BoxStream<'static, kube::Result<WatchEvent<Pod>>>;

struct WatchState<F> {
    connect: F,
    events: Option<RawEvents>,
    resource_version: String,
    pod: String,
}

/// Follow `events`, reopening the watch through `connect` from the last seen
/// resource version each time a connection ends cleanly.
///
/// `Added`/`Modified` yield a status event and `Bookmark` only advances the
/// resource version. A `Deleted` event, an `Error` event, a transport error
/// or a failed reconnect ends the stream.
pub fn resume_status_events<F, Fut>(
    events: RawEvents,
    resource_version: String,
    pod: String,
    connect: F,
) -> impl Stream<Item = PodStatusEvent> + Send
where
    F: FnMut(String) -> Fut + Send + 'static,
    Fut: Future<Output = kube::Result<RawEvents>> + Send,
{
    let state = WatchState {
        connect,
        events: Some(events),
        resource_version,
        pod,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if state.events.is_none() {
                debug!(pod = %state.pod, resource_version = %state.resource_version, "reopening watch");
                match (state.connect)(state.resource_version.clone()).await {
                    Ok(events) => state.events = Some(events),
                    Err(e) => {
                        warn!(pod = %state.pod, "failed to reopen watch: {}", e);
                        return None;
                    }
                }
            }
            let events = state.events.as_mut()?;

            match events.next().await {
                None => {
                    state.events = None;
                }
                Some(Ok(WatchEvent::Added(p))) | Some(Ok(WatchEvent::Modified(p))) => {
                    if let Some(version) = p.metadata.resource_version.clone() {
                        state.resource_version = version;
                    }
                    return Some((PodStatusEvent::from(&p), state));
                }
                Some(Ok(WatchEvent::Bookmark(b))) => {
                    state.resource_version = b.metadata.resource_version;
                }
                Some(Ok(WatchEvent::Deleted(_))) => {
                    info!(pod = %state.pod, "pod deleted while watching");
                    return None;
                }
                Some(Ok(WatchEvent::Error(e))) => {
                    warn!(pod = %state.pod, code = e.code, "watch error event: {}", e.message);
                    return None;
                }
                Some(Err(e)) => {
                    warn!(pod = %state.pod, "watch stream failed: {}", e);
                    return None;
                }
            }
        }
    })
}
