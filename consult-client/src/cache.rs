use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;
use tracing::debug;

use crate::error::ConsultClientResult;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Ключ кэша: путь запроса в пространстве имён API origin.
pub struct QueryKey {
    origin: String,
    path: String,
}

impl QueryKey {
    /// Создаёт ключ; путь дополняется ведущим `/`.
    pub fn new(origin: &str, path: &str) -> Self {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            path,
        }
    }

    /// Путь без origin.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl core::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}{}", self.origin, self.path)
    }
}

#[derive(Debug, Default)]
struct Slot {
    value: Option<Value>,
    generation: u64,
}

#[derive(Debug, Clone, Default)]
/// Кэш результатов запросов.
///
/// Записи не устаревают сами: значение живёт, пока его явно не
/// инвалидируют. Каждая инвалидация увеличивает поколение ключа, и результат
/// загрузки, начатой до инвалидации, в кэш уже не попадает.
///
/// Клонирование дешёвое: клоны разделяют одно хранилище.
pub struct QueryCache {
    slots: Arc<RwLock<HashMap<QueryKey, Slot>>>,
}

impl QueryCache {
    /// Создаёт пустой кэш.
    pub fn new() -> Self {
        Self::default()
    }

    /// Значение по ключу, если оно есть и не инвалидировано.
    pub fn get(&self, key: &QueryKey) -> Option<Value> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.get(key).and_then(|slot| slot.value.clone())
    }

    /// Кладёт значение без проверки поколения.
    pub fn set(&self, key: &QueryKey, value: Value) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots.entry(key.clone()).or_default().value = Some(value);
    }

    /// Помечает ключ устаревшим: следующее чтение пойдёт в сеть.
    ///
    /// Возвращает `true`, если в кэше было значение.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        let slot = slots.entry(key.clone()).or_default();
        slot.generation += 1;
        let had_value = slot.value.take().is_some();
        debug!(key = %key, generation = slot.generation, had_value, "cache invalidated");
        had_value
    }

    /// Сколько раз ключ инвалидировали.
    pub fn generation(&self, key: &QueryKey) -> u64 {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.get(key).map_or(0, |slot| slot.generation)
    }

    /// Сбрасывает все значения (поколения сохраняются).
    pub fn clear(&self) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        for slot in slots.values_mut() {
            slot.generation += 1;
            slot.value = None;
        }
    }

    /// Возвращает закэшированное значение или вызывает `loader` и сохраняет
    /// результат. Ошибки загрузки не кэшируются.
    pub async fn get_or_load<F, Fut>(&self, key: &QueryKey, loader: F) -> ConsultClientResult<Value>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ConsultClientResult<Value>>,
    {
        if let Some(value) = self.get(key) {
            debug!(key = %key, "cache hit");
            return Ok(value);
        }

        debug!(key = %key, "cache miss");
        let generation = self.generation(key);
        let value = loader().await?;
        self.store_if_current(key, generation, value.clone());
        Ok(value)
    }

    fn store_if_current(&self, key: &QueryKey, generation: u64, value: Value) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        let slot = slots.entry(key.clone()).or_default();
        if slot.generation != generation {
            debug!(key = %key, "discarding result loaded before invalidation");
            return;
        }
        slot.value = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConsultClientError;
    use serde_json::json;
    use std::cell::Cell;

    fn key() -> QueryKey {
        QueryKey::new("http://api.local/", "api/courses")
    }

    #[test]
    fn key_is_namespaced_by_origin() {
        assert_eq!(key().to_string(), "http://api.local/api/courses");
        assert_ne!(QueryKey::new("", "/api/courses"), key());
    }

    #[tokio::test]
    async fn second_read_is_served_from_cache() {
        let cache = QueryCache::new();
        let calls = Cell::new(0);

        for _ in 0..2 {
            let value = cache
                .get_or_load(&key(), || async {
                    calls.set(calls.get() + 1);
                    Ok(json!([1, 2]))
                })
                .await
                .expect("loader succeeds");
            assert_eq!(value, json!([1, 2]));
        }

        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn invalidation_forces_reload() {
        let cache = QueryCache::new();
        cache.set(&key(), json!(["old"]));

        assert!(cache.invalidate(&key()));
        assert_eq!(cache.generation(&key()), 1);

        let value = cache
            .get_or_load(&key(), || async { Ok(json!(["new"])) })
            .await
            .expect("loader succeeds");
        assert_eq!(value, json!(["new"]));
        assert_eq!(cache.get(&key()), Some(json!(["new"])));
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let cache = QueryCache::new();
        let err = cache
            .get_or_load(&key(), || async { Err(ConsultClientError::Network("down".to_string())) })
            .await
            .expect_err("loader fails");
        assert!(matches!(err, ConsultClientError::Network(_)));
        assert!(cache.get(&key()).is_none());
    }

    #[tokio::test]
    async fn result_loaded_across_invalidation_is_not_stored() {
        let cache = QueryCache::new();
        let value = cache
            .get_or_load(&key(), || {
                // мутация завершилась, пока список ещё грузился
                cache.invalidate(&key());
                async { Ok(json!(["stale"])) }
            })
            .await
            .expect("loader succeeds");

        assert_eq!(value, json!(["stale"]));
        assert!(cache.get(&key()).is_none());
    }
}
