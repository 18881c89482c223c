pub mod a001_payout_request;
pub mod a002_comment;
pub mod a003_order_chat;
