//! Состояние выплаты по заказу, выведенное из списка заявок
//!
//! Кнопка на странице заказа выбирается по [`PayoutState`], а не по набору
//! флагов: взаимоисключающие варианты закреплены типом.

use super::aggregate::{PayoutRequest, PayoutStatus, MAX_PAYOUT_ATTEMPTS};

/// Разбор заявок одного заказа по статусам
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoutAttempts<'a> {
    pub total: usize,
    pub rejected_count: usize,
    pub pending: Option<&'a PayoutRequest>,
    pub approved: Option<&'a PayoutRequest>,
    /// Отклонённая заявка с максимальным `requested_at`.
    /// При равных датах берётся последняя по порядку во входном списке.
    pub latest_rejected: Option<&'a PayoutRequest>,
}

impl<'a> PayoutAttempts<'a> {
    pub fn from_requests(requests: &'a [PayoutRequest]) -> Self {
        let mut attempts = Self {
            total: requests.len(),
            rejected_count: 0,
            pending: None,
            approved: None,
            latest_rejected: None,
        };

        for request in requests {
            match request.status {
                PayoutStatus::Pending => attempts.pending = Some(request),
                PayoutStatus::Approved => attempts.approved = Some(request),
                PayoutStatus::Rejected => {
                    attempts.rejected_count += 1;
                    let is_later = attempts
                        .latest_rejected
                        .map_or(true, |latest| request.requested_at >= latest.requested_at);
                    if is_later {
                        attempts.latest_rejected = Some(request);
                    }
                }
            }
        }

        attempts
    }

    fn is_open(&self) -> bool {
        self.pending.is_none() && self.approved.is_none()
    }

    pub fn can_retry(&self) -> bool {
        self.rejected_count > 0 && self.rejected_count < MAX_PAYOUT_ATTEMPTS && self.is_open()
    }

    pub fn max_reached(&self) -> bool {
        self.rejected_count >= MAX_PAYOUT_ATTEMPTS && self.is_open()
    }

    pub fn never_requested(&self) -> bool {
        self.total == 0
    }

    /// Номер следующей попытки (1-based)
    pub fn next_attempt(&self) -> usize {
        self.rejected_count + 1
    }

    pub fn state(&self) -> PayoutState {
        if let Some(request) = self.approved {
            return PayoutState::Approved {
                request: request.clone(),
            };
        }
        if let Some(request) = self.pending {
            return PayoutState::Pending {
                request: request.clone(),
                // номер попытки не превышает лимит, даже если API пропустил лишнюю заявку
                attempt: (self.rejected_count > 0)
                    .then(|| self.next_attempt().min(MAX_PAYOUT_ATTEMPTS)),
            };
        }
        match self.latest_rejected {
            Some(latest) if self.max_reached() => PayoutState::RejectedMaxed {
                latest_rejected: latest.clone(),
                rejected_count: self.rejected_count,
            },
            Some(latest) => PayoutState::RejectedRetryable {
                latest_rejected: latest.clone(),
                rejected_count: self.rejected_count,
                next_attempt: self.next_attempt(),
            },
            None => PayoutState::NeverRequested,
        }
    }
}

/// Состояние выплаты для UI
#[derive(Debug, Clone, PartialEq)]
pub enum PayoutState {
    /// Заявок ещё не было
    NeverRequested,
    /// Заявка на рассмотрении; `attempt` заполнен, если ей предшествовали отказы
    Pending {
        request: PayoutRequest,
        attempt: Option<usize>,
    },
    Approved {
        request: PayoutRequest,
    },
    /// Последняя заявка отклонена, можно подать повторно
    RejectedRetryable {
        latest_rejected: PayoutRequest,
        rejected_count: usize,
        next_attempt: usize,
    },
    /// Лимит попыток исчерпан, остаётся обращение в поддержку
    RejectedMaxed {
        latest_rejected: PayoutRequest,
        rejected_count: usize,
    },
}

/// Основное действие, доступное пользователю
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoutAction {
    RequestPayout,
    Retry { attempt: usize, of: usize },
    ContactSupport,
    NoAction,
}

impl PayoutState {
    pub fn primary_action(&self) -> PayoutAction {
        match self {
            PayoutState::NeverRequested => PayoutAction::RequestPayout,
            PayoutState::RejectedRetryable { next_attempt, .. } => PayoutAction::Retry {
                attempt: *next_attempt,
                of: MAX_PAYOUT_ATTEMPTS,
            },
            PayoutState::RejectedMaxed { .. } => PayoutAction::ContactSupport,
            PayoutState::Pending { .. } | PayoutState::Approved { .. } => PayoutAction::NoAction,
        }
    }

    /// Заявка, по которой показываются детали (сумма, даты, комментарий)
    pub fn current_request(&self) -> Option<&PayoutRequest> {
        match self {
            PayoutState::NeverRequested => None,
            PayoutState::Pending { request, .. } | PayoutState::Approved { request } => {
                Some(request)
            }
            PayoutState::RejectedRetryable {
                latest_rejected, ..
            }
            | PayoutState::RejectedMaxed {
                latest_rejected, ..
            } => Some(latest_rejected),
        }
    }

    pub fn title(&self) -> String {
        match self {
            PayoutState::NeverRequested => "Выплата не запрошена".to_string(),
            PayoutState::Pending {
                attempt: Some(attempt),
                ..
            } => format!(
                "Заявка на рассмотрении (попытка {} из {})",
                attempt, MAX_PAYOUT_ATTEMPTS
            ),
            PayoutState::Pending { attempt: None, .. } => "Заявка на рассмотрении".to_string(),
            PayoutState::Approved { .. } => "Выплата одобрена".to_string(),
            PayoutState::RejectedRetryable { rejected_count, .. } => format!(
                "Заявка отклонена ({} из {})",
                rejected_count, MAX_PAYOUT_ATTEMPTS
            ),
            PayoutState::RejectedMaxed { .. } => {
                "Лимит заявок исчерпан, обратитесь в поддержку".to_string()
            }
        }
    }
}

/// Вывести состояние выплаты из всех заявок заказа
pub fn derive_payout_state(requests: &[PayoutRequest]) -> PayoutState {
    PayoutAttempts::from_requests(requests).state()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::{OrderId, PayoutRequestId};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap()
    }

    fn request(id: &str, status: PayoutStatus, day: u32) -> PayoutRequest {
        let mut r = PayoutRequest::new_pending(
            PayoutRequestId::new(id),
            OrderId::new("order-1"),
            250.0,
            at(day),
        );
        r.status = status;
        if status != PayoutStatus::Pending {
            r.processed_at = Some(at(day + 1));
        }
        r
    }

    fn rejected(id: &str, day: u32) -> PayoutRequest {
        request(id, PayoutStatus::Rejected, day)
    }

    #[test]
    fn test_empty_list_is_never_requested() {
        let attempts = PayoutAttempts::from_requests(&[]);
        assert!(attempts.never_requested());
        assert!(!attempts.can_retry());
        assert!(!attempts.max_reached());
        assert_eq!(attempts.rejected_count, 0);
        assert!(attempts.pending.is_none());
        assert!(attempts.approved.is_none());

        let state = derive_payout_state(&[]);
        assert_eq!(state, PayoutState::NeverRequested);
        assert_eq!(state.primary_action(), PayoutAction::RequestPayout);
    }

    #[test]
    fn test_two_rejections_can_retry() {
        let requests = vec![rejected("r1", 1), rejected("r2", 3)];
        let attempts = PayoutAttempts::from_requests(&requests);
        assert_eq!(attempts.rejected_count, 2);
        assert!(attempts.can_retry());
        assert!(!attempts.max_reached());
        assert!(!attempts.never_requested());

        let state = attempts.state();
        assert_eq!(
            state.primary_action(),
            PayoutAction::Retry { attempt: 3, of: 3 }
        );
        match state {
            PayoutState::RejectedRetryable {
                latest_rejected,
                rejected_count,
                next_attempt,
            } => {
                assert_eq!(latest_rejected.id.as_str(), "r2");
                assert_eq!(rejected_count, 2);
                assert_eq!(next_attempt, 3);
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[test]
    fn test_three_rejections_reach_limit() {
        let requests = vec![rejected("r1", 1), rejected("r2", 2), rejected("r3", 3)];
        let attempts = PayoutAttempts::from_requests(&requests);
        assert_eq!(attempts.rejected_count, 3);
        assert!(!attempts.can_retry());
        assert!(attempts.max_reached());

        let state = attempts.state();
        assert!(matches!(
            state,
            PayoutState::RejectedMaxed {
                rejected_count: 3,
                ..
            }
        ));
        assert_eq!(state.primary_action(), PayoutAction::ContactSupport);
        assert_eq!(state.current_request().unwrap().id.as_str(), "r3");
    }

    #[test]
    fn test_pending_wins_over_rejections() {
        let requests = vec![
            rejected("r1", 1),
            rejected("r2", 2),
            request("p1", PayoutStatus::Pending, 4),
        ];
        let attempts = PayoutAttempts::from_requests(&requests);
        assert!(!attempts.can_retry());
        assert!(!attempts.max_reached());

        let state = attempts.state();
        match &state {
            PayoutState::Pending { request, attempt } => {
                assert_eq!(request.id.as_str(), "p1");
                assert_eq!(*attempt, Some(3));
            }
            other => panic!("unexpected state: {:?}", other),
        }
        assert_eq!(state.primary_action(), PayoutAction::NoAction);
        assert_eq!(state.title(), "Заявка на рассмотрении (попытка 3 из 3)");
    }

    #[test]
    fn test_pending_attempt_is_capped_at_limit() {
        let requests = vec![
            rejected("r1", 1),
            rejected("r2", 2),
            rejected("r3", 3),
            request("p1", PayoutStatus::Pending, 4),
        ];
        let state = derive_payout_state(&requests);
        assert!(matches!(state, PayoutState::Pending { attempt: Some(3), .. }));
        assert_eq!(state.title(), "Заявка на рассмотрении (попытка 3 из 3)");
    }

    #[test]
    fn test_first_pending_has_no_attempt_label() {
        let requests = vec![request("p1", PayoutStatus::Pending, 1)];
        let state = derive_payout_state(&requests);
        assert!(matches!(state, PayoutState::Pending { attempt: None, .. }));
        assert_eq!(state.title(), "Заявка на рассмотрении");
    }

    #[test]
    fn test_approved_takes_precedence() {
        let requests = vec![request("a1", PayoutStatus::Approved, 2)];
        let state = derive_payout_state(&requests);
        assert!(matches!(state, PayoutState::Approved { .. }));

        // даже при нарушенном инварианте API одобренная заявка важнее
        let requests = vec![
            rejected("r1", 1),
            rejected("r2", 2),
            rejected("r3", 3),
            request("p1", PayoutStatus::Pending, 4),
            request("a1", PayoutStatus::Approved, 5),
        ];
        let attempts = PayoutAttempts::from_requests(&requests);
        assert!(!attempts.can_retry());
        assert!(!attempts.max_reached());
        match attempts.state() {
            PayoutState::Approved { request } => assert_eq!(request.id.as_str(), "a1"),
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[test]
    fn test_latest_rejected_ignores_input_order() {
        let requests = vec![rejected("late", 9), rejected("early", 2)];
        let attempts = PayoutAttempts::from_requests(&requests);
        assert_eq!(attempts.latest_rejected.unwrap().id.as_str(), "late");
    }

    #[test]
    fn test_latest_rejected_tie_is_deterministic() {
        let requests = vec![rejected("a", 5), rejected("b", 5)];
        let first = PayoutAttempts::from_requests(&requests)
            .latest_rejected
            .map(|r| r.id.clone());
        let second = PayoutAttempts::from_requests(&requests)
            .latest_rejected
            .map(|r| r.id.clone());
        let chosen = first.expect("one of the tied rejections");
        assert!(chosen.as_str() == "a" || chosen.as_str() == "b");
        assert_eq!(Some(chosen), second);
    }

    #[test]
    fn test_retry_and_max_are_mutually_exclusive() {
        let statuses = [
            PayoutStatus::Pending,
            PayoutStatus::Approved,
            PayoutStatus::Rejected,
        ];
        // все комбинации из 0..=4 заявок любых статусов
        for code in 0..4usize.pow(4) {
            let list: Vec<PayoutRequest> = (0..4u32)
                .filter_map(|pos| {
                    let digit = (code / 4usize.pow(pos)) % 4;
                    let status = statuses.get(digit.checked_sub(1)?)?;
                    Some(request(&format!("r{}", pos), *status, pos + 1))
                })
                .collect();

            let attempts = PayoutAttempts::from_requests(&list);
            assert!(
                !(attempts.can_retry() && attempts.max_reached()),
                "both flags set for {:?}",
                list.iter().map(|r| r.status).collect::<Vec<_>>()
            );
        }
    }
}
