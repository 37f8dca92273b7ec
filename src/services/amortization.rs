// src/services/amortization.rs
//
// Regras puras de amortização de dívidas. Sem I/O.
// O abatimento de um pagamento fica no `UPDATE` de `DebtRepository::apply_payment`.

/// Quantas parcelas inteiras ainda cabem no saldo: `floor(saldo / parcela)`.
/// Parcela zero (ou negativa) devolve 0 em vez de dividir por zero.
pub fn remaining_installments(remaining_amount: f64, installment_amount: f64) -> i64 {
    if installment_amount > 0.0 {
        (remaining_amount / installment_amount).floor() as i64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_installments_floors_the_ratio() {
        assert_eq!(remaining_installments(100.0, 30.0), 3);
        assert_eq!(remaining_installments(90.0, 30.0), 3);
        assert_eq!(remaining_installments(29.99, 30.0), 0);
        assert_eq!(remaining_installments(0.0, 30.0), 0);
        assert_eq!(remaining_installments(1_000_000.0, 0.5), 2_000_000);
    }

    #[test]
    fn remaining_installments_is_zero_without_installment_amount() {
        assert_eq!(remaining_installments(100.0, 0.0), 0);
        assert_eq!(remaining_installments(0.0, 0.0), 0);
        assert_eq!(remaining_installments(100.0, -5.0), 0);
    }

    #[test]
    fn remaining_installments_matches_floor_over_a_grid() {
        for remaining in [0.0_f64, 0.5, 1.0, 33.3, 99.99, 100.0, 250.0] {
            for installment in [0.1_f64, 1.0, 7.5, 33.3, 100.0] {
                let expected = (remaining / installment).floor() as i64;
                assert_eq!(remaining_installments(remaining, installment), expected);
            }
        }
    }
}
