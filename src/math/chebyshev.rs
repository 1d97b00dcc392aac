/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::errors::MathError;

/// Evaluates a Chebyshev expansion by Clenshaw summation, returning the
/// value and its derivative with respect to the physical (un-normalized)
/// variable.
///
/// With b_k = c_k + 2x b_{k+1} - b_{k+2} run downward from the highest
/// coefficient, the value is c_0 + x b_1 - b_2; differentiating the same
/// recurrence gives d_k = 2 b_{k+1} + 2x d_{k+1} - d_{k+2} and the slope
/// b_1 + x d_1 - d_2.
///
/// `normalized_time` must be in [-1, 1]; `radius` is the half-width of the
/// physical interval the coefficients were fitted over, in the caller's
/// time unit (the derivative is scaled by `1/radius`).
pub fn chebyshev_eval(
    normalized_time: f64,
    coeffs: &[f64],
    radius: f64,
) -> Result<(f64, f64), MathError> {
    if radius.abs() < f64::EPSILON {
        return Err(MathError::DivisionByZero {
            action: "sub-interval radius in Chebyshev eval is zero",
        });
    }
    let Some((&c0, higher)) = coeffs.split_first() else {
        return Err(MathError::DomainError {
            value: 0.0,
            msg: "no Chebyshev coefficients",
        });
    };

    let x = normalized_time;
    let two_x = 2.0 * x;
    // (b_{k+1}, b_{k+2}) and (d_{k+1}, d_{k+2}), walking k from the top
    // coefficient down to 1.
    let (mut b1, mut b2) = (0.0_f64, 0.0_f64);
    let (mut d1, mut d2) = (0.0_f64, 0.0_f64);
    for &ck in higher.iter().rev() {
        let dk = 2.0 * b1 + two_x * d1 - d2;
        let bk = ck + two_x * b1 - b2;
        b2 = b1;
        b1 = bk;
        d2 = d1;
        d1 = dk;
    }

    let value = c0 + x * b1 - b2;
    let slope = (b1 + x * d1 - d2) / radius;
    Ok((value, slope))
}
