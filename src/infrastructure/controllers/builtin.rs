//! Built-in controller modules for the dashboard views.
//!
//! Polling controllers own one interval task each. The task is started by the
//! module's show hook and aborted by its hide hook; starting twice is a no-op.
//! Every tick stamps the view container with `data-refresh-count` and
//! `data-refreshed-at`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::task::AbortHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::domain::entities::ControllerRef;
use crate::domain::errors::ViewError;
use crate::domain::ports::{ControllerLoaderPort, ControllerModule, HookContext};
use crate::infrastructure::config::ControllersConfig;

#[derive(Debug, Default)]
struct Inner {
    pollers: Mutex<HashMap<ControllerRef, AbortHandle>>,
    imports: Mutex<HashMap<ControllerRef, usize>>,
}

impl Inner {
    fn start_polling(&self, module: ControllerRef, period: Duration, cx: &HookContext) {
        let mut pollers = self.pollers.lock();
        if pollers.get(&module).is_some_and(|task| !task.is_finished()) {
            debug!(module = %module, "Polling already running");
            return;
        }

        let document = cx.document.clone();
        let container_id = cx.view.container_id();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut ticks: u64 = 0;
            loop {
                ticker.tick().await;
                ticks += 1;
                let Some(node) = document.get_element_by_id(&container_id) else {
                    continue;
                };
                document.set_attribute(node, "data-refresh-count", &ticks.to_string());
                document.set_attribute(
                    node,
                    "data-refreshed-at",
                    &chrono::Local::now().format("%H:%M:%S").to_string(),
                );
            }
        });
        debug!(module = %module, period_ms = period.as_millis(), "Polling started");
        pollers.insert(module, task.abort_handle());
    }

    fn stop_polling(&self, module: ControllerRef) {
        if let Some(task) = self.pollers.lock().remove(&module) {
            task.abort();
            debug!(module = %module, "Polling stopped");
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        for task in self.pollers.get_mut().values() {
            task.abort();
        }
    }
}

/// Resolves [`ControllerRef`]s to the dashboard's built-in modules.
#[derive(Debug, Clone)]
pub struct BuiltinControllers {
    config: ControllersConfig,
    inner: Arc<Inner>,
}

impl Default for BuiltinControllers {
    fn default() -> Self {
        Self::new(ControllersConfig::default())
    }
}

impl BuiltinControllers {
    /// Creates the controller set with the given refresh intervals.
    #[must_use]
    pub fn new(config: ControllersConfig) -> Self {
        Self {
            config,
            inner: Arc::new(Inner::default()),
        }
    }

    /// Returns how often `module` was imported.
    #[must_use]
    pub fn import_count(&self, module: ControllerRef) -> usize {
        self.inner.imports.lock().get(&module).copied().unwrap_or(0)
    }

    /// Returns whether `module` has a live polling task.
    #[must_use]
    pub fn is_polling(&self, module: ControllerRef) -> bool {
        self.inner
            .pollers
            .lock()
            .get(&module)
            .is_some_and(|task| !task.is_finished())
    }

    /// Aborts every polling task.
    pub fn stop_all(&self) {
        for (module, task) in self.inner.pollers.lock().drain() {
            debug!(module = %module, "Polling stopped");
            task.abort();
        }
    }

    fn module(&self, module: ControllerRef) -> ControllerModule {
        match module {
            ControllerRef::AccessController => self.polling(
                module,
                "startCameraRefresh",
                "stopCameraRefresh",
                self.config.camera_refresh_ms,
            ),
            ControllerRef::PcMetrics => self.polling(
                module,
                "startPCMetrics",
                "stopPCMetrics",
                self.config.pc_metrics_refresh_ms,
            ),
            ControllerRef::Surveillance => self.polling(
                module,
                "onViewShow",
                "onViewHide",
                self.config.surveillance_refresh_ms,
            ),
            ControllerRef::SecurityController => initializer(module, "initializeZoneTimeline"),
            ControllerRef::EnergyChart => initializer(module, "onEnergyViewShow"),
            ControllerRef::EnergyDisplay => initializer(module, "initEnergyDisplay"),
            ControllerRef::Calendar => initializer(module, "initCalendar")
                .with_hook("destroyCalendar", |cx: HookContext| async move {
                    if let Some(node) = cx.document.get_element_by_id(&cx.view.container_id()) {
                        cx.document.remove_attribute(node, "data-initialized");
                    }
                    Ok(())
                }),
            ControllerRef::Media => initializer(module, "initMediaPortal"),
            ControllerRef::GuestPass => ControllerModule::new(module),
            ControllerRef::Weather => initializer(module, "init"),
            ControllerRef::Alexa => initializer(module, "initAlexa"),
        }
    }

    fn polling(
        &self,
        module: ControllerRef,
        start: &'static str,
        stop: &'static str,
        period_ms: u64,
    ) -> ControllerModule {
        let period = Duration::from_millis(period_ms.max(1));
        let on_start = Arc::clone(&self.inner);
        let on_stop = Arc::clone(&self.inner);
        ControllerModule::new(module)
            .with_hook(start, move |cx| {
                on_start.start_polling(module, period, &cx);
                async { Ok(()) }
            })
            .with_hook(stop, move |_| {
                on_stop.stop_polling(module);
                async { Ok(()) }
            })
    }
}

fn initializer(module: ControllerRef, hook: &'static str) -> ControllerModule {
    ControllerModule::new(module).with_hook(hook, |cx: HookContext| async move {
        let id = cx.view.container_id();
        let Some(node) = cx.document.get_element_by_id(&id) else {
            return Err(ViewError::container_missing(id));
        };
        cx.document.set_attribute(node, "data-initialized", "true");
        Ok(())
    })
}

#[async_trait]
impl ControllerLoaderPort for BuiltinControllers {
    async fn load(&self, module: ControllerRef) -> Result<ControllerModule, ViewError> {
        *self.inner.imports.lock().entry(module).or_insert(0) += 1;
        info!(module = %module, "Controller module loaded");
        Ok(self.module(module))
    }
}
