use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use shared_storage::DocumentStore;

use crate::error::ScheduleError;
use crate::models::{DaySlots, ProviderSchedule};

pub const SCHEDULES_DOC: &str = "schedules";

/// Exclusive owner of slot existence. Every mutation runs through
/// [`DocumentStore::update`] on the schedules document, so `consume_slot`
/// and `replace_slots` share one exclusion scope and a slot can be observed
/// as present by at most one concurrent consumer.
#[derive(Clone)]
pub struct SlotStoreService {
    store: Arc<DocumentStore>,
}

impl SlotStoreService {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn list_providers(&self) -> Result<Vec<ProviderSchedule>, ScheduleError> {
        Ok(self.store.read(SCHEDULES_DOC).await?)
    }

    /// Current availability for one provider; empty if the provider is unknown.
    pub async fn list_slots(&self, provider_id: &str) -> Result<Vec<DaySlots>, ScheduleError> {
        let all: Vec<ProviderSchedule> = self.store.read(SCHEDULES_DOC).await?;
        Ok(all
            .into_iter()
            .find(|provider| provider.provider_id == provider_id)
            .map(|provider| provider.schedule)
            .unwrap_or_default())
    }

    pub async fn provider_name(&self, provider_id: &str) -> Result<Option<String>, ScheduleError> {
        let all: Vec<ProviderSchedule> = self.store.read(SCHEDULES_DOC).await?;
        Ok(all
            .into_iter()
            .find(|provider| provider.provider_id == provider_id)
            .map(|provider| provider.name))
    }

    /// Admin bulk-replace: total overwrite of one provider's slot set.
    /// Empty-slot dates are dropped and duplicate labels within a date
    /// collapse before anything persists.
    pub async fn replace_slots(
        &self,
        provider_id: &str,
        name: &str,
        schedule: Vec<DaySlots>,
    ) -> Result<(), ScheduleError> {
        let normalized = normalize_schedule(schedule);
        let provider_id = provider_id.to_string();
        let name = name.to_string();

        info!(
            "Replacing schedule for provider {} ({} dates)",
            provider_id,
            normalized.len()
        );

        self.store
            .update::<Vec<ProviderSchedule>, _>(SCHEDULES_DOC, move |all| {
                match all.iter_mut().find(|p| p.provider_id == provider_id) {
                    Some(provider) => {
                        provider.name = name;
                        provider.schedule = normalized;
                    }
                    None => all.push(ProviderSchedule {
                        provider_id,
                        name,
                        schedule: normalized,
                    }),
                }
            })
            .await?;

        Ok(())
    }

    /// The concurrency gate: remove exactly one time label under the
    /// document mutex. Removing the last label removes the date entry too.
    /// Returns `SlotNotFound` when the triple is absent, which is how a
    /// race loser learns the slot went to someone else.
    pub async fn consume_slot(
        &self,
        provider_id: &str,
        date: NaiveDate,
        time: &str,
    ) -> Result<(), ScheduleError> {
        let provider_key = provider_id.to_string();
        let time_label = time.to_string();

        let removed = self
            .store
            .update::<Vec<ProviderSchedule>, bool>(SCHEDULES_DOC, move |all| {
                let Some(provider) = all.iter_mut().find(|p| p.provider_id == provider_key)
                else {
                    return false;
                };
                let Some(day_idx) = provider.schedule.iter().position(|d| d.date == date)
                else {
                    return false;
                };
                let day = &mut provider.schedule[day_idx];
                let Some(slot_idx) = day.slots.iter().position(|s| *s == time_label) else {
                    return false;
                };

                day.slots.remove(slot_idx);
                if day.slots.is_empty() {
                    provider.schedule.remove(day_idx);
                }
                true
            })
            .await?;

        if removed {
            debug!("Consumed slot {} {} for provider {}", date, time, provider_id);
            Ok(())
        } else {
            Err(ScheduleError::SlotNotFound {
                provider_id: provider_id.to_string(),
                date,
                time: time.to_string(),
            })
        }
    }

    /// Compensating re-insert for a consumed slot whose reservation failed
    /// to persist. Runs under the same document mutex as `consume_slot`.
    pub async fn restore_slot(
        &self,
        provider_id: &str,
        date: NaiveDate,
        time: &str,
    ) -> Result<(), ScheduleError> {
        let provider_key = provider_id.to_string();
        let time_label = time.to_string();

        self.store
            .update::<Vec<ProviderSchedule>, _>(SCHEDULES_DOC, move |all| {
                let Some(provider) = all.iter_mut().find(|p| p.provider_id == provider_key)
                else {
                    warn!(
                        "Cannot restore slot {} {}: provider {} no longer in schedule",
                        date, time_label, provider_key
                    );
                    return;
                };

                match provider.schedule.iter().position(|d| d.date >= date) {
                    Some(idx) if provider.schedule[idx].date == date => {
                        let day = &mut provider.schedule[idx];
                        if !day.slots.iter().any(|s| *s == time_label) {
                            let at = day
                                .slots
                                .iter()
                                .position(|s| *s > time_label)
                                .unwrap_or(day.slots.len());
                            day.slots.insert(at, time_label);
                        }
                    }
                    Some(idx) => provider.schedule.insert(
                        idx,
                        DaySlots {
                            date,
                            slots: vec![time_label],
                        },
                    ),
                    None => provider.schedule.push(DaySlots {
                        date,
                        slots: vec![time_label],
                    }),
                }
            })
            .await?;

        info!(
            "Restored slot {} {} for provider {} after failed reservation",
            date, time, provider_id
        );
        Ok(())
    }
}

/// Drop empty dates and collapse duplicate time labels, preserving the
/// admin's entry order for both dates and labels.
fn normalize_schedule(schedule: Vec<DaySlots>) -> Vec<DaySlots> {
    schedule
        .into_iter()
        .filter_map(|day| {
            let mut seen = Vec::with_capacity(day.slots.len());
            for slot in day.slots {
                if !seen.contains(&slot) {
                    seen.push(slot);
                }
            }
            if seen.is_empty() {
                None
            } else {
                Some(DaySlots {
                    date: day.date,
                    slots: seen,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn normalize_drops_empty_dates_and_duplicates() {
        let normalized = normalize_schedule(vec![
            DaySlots {
                date: date("2025-06-01"),
                slots: vec![],
            },
            DaySlots {
                date: date("2025-05-23"),
                slots: vec![
                    "10:00".to_string(),
                    "13:00".to_string(),
                    "10:00".to_string(),
                ],
            },
        ]);

        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].date, date("2025-05-23"));
        assert_eq!(
            normalized[0].slots,
            vec!["10:00".to_string(), "13:00".to_string()]
        );
    }
}
