//! 业务服务
//!
//! - [`order_lifecycle`] - 订单状态流转 (校验 + compare-and-set 写入)
//! - [`checkout`] - 事务性下单 (订单、明细、支付、小票)

pub mod checkout;
pub mod order_lifecycle;
