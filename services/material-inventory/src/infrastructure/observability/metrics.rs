//! Material Inventory Metrics
//!
//! 业务指标记录

use metrics::{counter, gauge, histogram};
use std::time::Instant;

// ============================================================================
// 目录 Metrics
// ============================================================================

/// 记录去重/插入结果（matched / created）
pub fn record_upsert(outcome: &str, tag: &str) {
    let labels = [("outcome", outcome.to_string()), ("tag", tag.to_string())];
    counter!("inventory_upsert_total", &labels).increment(1);
}

/// 记录解码失败
pub fn record_decode_failure(kind: &str) {
    let labels = [("kind", kind.to_string())];
    counter!("inventory_decode_failures_total", &labels).increment(1);
}

/// 记录级联删除的目录行
pub fn record_cascade_delete() {
    counter!("inventory_cascade_deletes_total").increment(1);
}

/// 设置目录行数
pub fn set_catalog_size(count: usize) {
    gauge!("inventory_catalog_rows").set(count as f64);
}

// ============================================================================
// 库存 Metrics
// ============================================================================

/// 记录库存变动
pub fn record_movement(action: &str, quantity: i64) {
    let labels = [("action", action.to_string())];
    counter!("inventory_movements_total", &labels).increment(1);
    counter!("inventory_movement_units_total", &labels).increment(quantity.unsigned_abs());
}

/// 记录导入的交换文件行
pub fn record_import(success: bool) {
    let labels = [("success", success.to_string())];
    counter!("inventory_exchange_imports_total", &labels).increment(1);
}

// ============================================================================
// 辅助工具
// ============================================================================

/// 操作耗时计时器，drop 时记录
pub struct OperationTimer {
    operation: &'static str,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            start: Instant::now(),
        }
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        let labels = [("operation", self.operation.to_string())];
        histogram!("inventory_operation_duration_seconds", &labels)
            .record(self.start.elapsed().as_secs_f64());
    }
}
