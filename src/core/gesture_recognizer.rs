// Async gesture recognition - classifies submitted frames on a background task

use crate::core::config::GestureConfig;
use crate::core::frame_processor::FrameProcessor;
use crate::models::gesture::{GestureError, GestureEvent, GestureResult, PoseLabel};
use crate::models::hand::Frame;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::{info, warn};

// ==============================================================================
// Statistics
// ==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognizerStats {
    pub frames_processed: u64,
    pub frames_rejected: u64,
    pub motion_events: u64,
    pub last_pose: Option<PoseLabel>,
}

// ==============================================================================
// Gesture Recognizer
// ==============================================================================

/// Background gesture recognition over a stream of frames.
///
/// Frames go through one bounded channel to a single worker task, so they are
/// classified one at a time in submission order. Out-of-order frames are
/// dropped with a warning and counted as rejected.
pub struct GestureRecognizer {
    config: Arc<RwLock<GestureConfig>>,
    stats: Arc<RwLock<RecognizerStats>>,
    is_running: Arc<RwLock<bool>>,
    frame_tx: Arc<RwLock<Option<mpsc::Sender<Frame>>>>,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> GestureResult<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            stats: Arc::new(RwLock::new(RecognizerStats::default())),
            is_running: Arc::new(RwLock::new(false)),
            frame_tx: Arc::new(RwLock::new(None)),
        })
    }

    /// Start the worker; classification events arrive on the returned receiver
    pub async fn start(&self) -> GestureResult<mpsc::Receiver<GestureEvent>> {
        let mut is_running = self.is_running.write().await;
        if *is_running {
            return Err(GestureError::AlreadyRunning);
        }

        let config = self.config.read().await.clone();
        let (frame_tx, frame_rx) = mpsc::channel::<Frame>(config.channel_capacity);
        let (event_tx, event_rx) = mpsc::channel::<GestureEvent>(config.channel_capacity);
        *self.frame_tx.write().await = Some(frame_tx);
        *self.stats.write().await = RecognizerStats::default();

        *is_running = true;

        let processor = FrameProcessor::new(&config);
        let stats = self.stats.clone();

        tokio::spawn(async move {
            Self::process_frames(frame_rx, event_tx, processor, stats).await;
        });

        info!(
            "Started gesture recognition (policy {:?}, capacity {})",
            config.motion.update_policy, config.channel_capacity
        );
        Ok(event_rx)
    }

    /// Stop accepting frames; the worker finishes the queued ones and exits
    pub async fn stop(&self) -> GestureResult<()> {
        let mut is_running = self.is_running.write().await;
        if !*is_running {
            return Ok(());
        }

        // Dropping the sender ends the worker loop once the queue drains
        *self.frame_tx.write().await = None;
        *is_running = false;

        info!("Stopped gesture recognition");
        Ok(())
    }

    /// Queue a frame for classification
    pub async fn submit(&self, frame: Frame) -> GestureResult<()> {
        let tx = self.frame_tx.read().await.clone();
        let tx = tx.ok_or(GestureError::NotRunning)?;

        tx.send(frame)
            .await
            .map_err(|_| GestureError::ChannelClosed)
    }

    pub async fn is_running(&self) -> bool {
        *self.is_running.read().await
    }

    pub async fn stats(&self) -> RecognizerStats {
        self.stats.read().await.clone()
    }

    /// Replace the configuration used by the next `start`
    pub async fn set_config(&self, config: GestureConfig) -> GestureResult<()> {
        config.validate()?;
        *self.config.write().await = config;
        Ok(())
    }

    async fn process_frames(
        mut rx: mpsc::Receiver<Frame>,
        event_tx: mpsc::Sender<GestureEvent>,
        mut processor: FrameProcessor,
        stats: Arc<RwLock<RecognizerStats>>,
    ) {
        while let Some(frame) = rx.recv().await {
            match processor.process(&frame) {
                Ok(outcome) => {
                    {
                        let mut stats = stats.write().await;
                        stats.frames_processed += 1;
                        stats.last_pose = Some(outcome.pose);
                        if outcome.motion.is_some() {
                            stats.motion_events += 1;
                        }
                    }

                    if event_tx.send(GestureEvent::from(outcome)).await.is_err() {
                        warn!("Gesture event receiver dropped, stopping recognition worker");
                        break;
                    }
                }
                Err(e) => {
                    warn!("Skipping frame {}: {}", frame.timestamp, e);
                    stats.write().await.frames_rejected += 1;
                }
            }
        }
    }
}
