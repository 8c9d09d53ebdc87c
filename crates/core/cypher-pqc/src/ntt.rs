//! Number-theoretic transforms for both rings
//!
//! Kyber uses an incomplete 7-layer transform over Z_3329, so the NTT domain
//! holds 128 degree-1 residues and multiplication needs [`basemul`]. Dilithium
//! uses a complete 8-layer transform over Z_8380417 with pointwise products.
//!
//! Twiddle factors are powers of the primitive root (17 and 1753) in
//! bit-reversed order, stored in Montgomery form.

use crate::reduce::{dilithium as dred, kyber as kred};

/// Kyber twiddle factors: `MONT * 17^brv7(i) mod q`, centered
pub const KYBER_ZETAS: [i16; 128] = [
    -1044, -758, -359, -1517, 1493, 1422, 287, 202, -171, 622, 1577, 182, 962, -1202, -1474, 1468,
    573, -1325, 264, 383, -829, 1458, -1602, -130, -681, 1017, 732, 608, -1542, 411, -205, -1571,
    1223, 652, -552, 1015, -1293, 1491, -282, -1544, 516, -8, -320, -666, -1618, -1162, 126, 1469,
    -853, -90, -271, 830, 107, -1421, -247, -951, -398, 961, -1508, -725, 448, -1065, 677, -1275,
    -1103, 430, 555, 843, -1251, 871, 1550, 105, 422, 587, 177, -235, -291, -460, 1574, 1653,
    -246, 778, 1159, -147, -777, 1483, -602, 1119, -1590, 644, -872, 349, 418, 329, -156, -75,
    817, 1097, 603, 610, 1322, -1285, -1465, 384, -1215, -136, 1218, -1335, -874, 220, -1187, -1659,
    -1185, -1530, -1278, 794, -1510, -854, -870, 478, -108, -308, 996, 991, 958, -1460, 1522, 1628
];

/// Dilithium twiddle factors: `2^32 * 1753^brv8(i) mod q`, centered
pub const DILITHIUM_ZETAS: [i32; 256] = [
    0, 25847, -2608894, -518909, 237124, -777960, -876248, 466468,
    1826347, 2353451, -359251, -2091905, 3119733, -2884855, 3111497, 2680103,
    2725464, 1024112, -1079900, 3585928, -549488, -1119584, 2619752, -2108549,
    -2118186, -3859737, -1399561, -3277672, 1757237, -19422, 4010497, 280005,
    2706023, 95776, 3077325, 3530437, -1661693, -3592148, -2537516, 3915439,
    -3861115, -3043716, 3574422, -2867647, 3539968, -300467, 2348700, -539299,
    -1699267, -1643818, 3505694, -3821735, 3507263, -2140649, -1600420, 3699596,
    811944, 531354, 954230, 3881043, 3900724, -2556880, 2071892, -2797779,
    -3930395, -1528703, -3677745, -3041255, -1452451, 3475950, 2176455, -1585221,
    -1257611, 1939314, -4083598, -1000202, -3190144, -3157330, -3632928, 126922,
    3412210, -983419, 2147896, 2715295, -2967645, -3693493, -411027, -2477047,
    -671102, -1228525, -22981, -1308169, -381987, 1349076, 1852771, -1430430,
    -3343383, 264944, 508951, 3097992, 44288, -1100098, 904516, 3958618,
    -3724342, -8578, 1653064, -3249728, 2389356, -210977, 759969, -1316856,
    189548, -3553272, 3159746, -1851402, -2409325, -177440, 1315589, 1341330,
    1285669, -1584928, -812732, -1439742, -3019102, -3881060, -3628969, 3839961,
    2091667, 3407706, 2316500, 3817976, -3342478, 2244091, -2446433, -3562462,
    266997, 2434439, -1235728, 3513181, -3520352, -3759364, -1197226, -3193378,
    900702, 1859098, 909542, 819034, 495491, -1613174, -43260, -522500,
    -655327, -3122442, 2031748, 3207046, -3556995, -525098, -768622, -3595838,
    342297, 286988, -2437823, 4108315, 3437287, -3342277, 1735879, 203044,
    2842341, 2691481, -2590150, 1265009, 4055324, 1247620, 2486353, 1595974,
    -3767016, 1250494, 2635921, -3548272, -2994039, 1869119, 1903435, -1050970,
    -1333058, 1237275, -3318210, -1430225, -451100, 1312455, 3306115, -1962642,
    -1279661, 1917081, -2546312, -1374803, 1500165, 777191, 2235880, 3406031,
    -542412, -2831860, -1671176, -1846953, -2584293, -3724270, 594136, -3776993,
    -2013608, 2432395, 2454455, -164721, 1957272, 3369112, 185531, -1207385,
    -3183426, 162844, 1616392, 3014001, 810149, 1652634, -3694233, -1799107,
    -3038916, 3523897, 3866901, 269760, 2213111, -975884, 1717735, 472078,
    -426683, 1723600, -1803090, 1910376, -1667432, -1104333, -260646, -3833893,
    -2939036, -2235985, -420899, -2286327, 183443, -976891, 1612842, -3545687,
    -554416, 3919660, -48306, -1362209, 3937738, 1400424, -846154, 1976782
];

/// mont^2 / 128, folds the 1/128 scaling and the Montgomery factor together
const KYBER_INVNTT_F: i16 = 1441;

/// mont^2 / 256
const DILITHIUM_INVNTT_F: i32 = 41978;

/// Forward Kyber NTT in place.
///
/// Input in normal order with |coeff| < q, output in bit-reversed order,
/// Barrett-reduced.
pub fn ntt(r: &mut [i16; 256]) {
    let mut k = 1;
    let mut len = 128;
    while len >= 2 {
        for start in (0..256).step_by(2 * len) {
            let zeta = KYBER_ZETAS[k];
            k += 1;
            for j in start..start + len {
                let t = kred::fqmul(zeta, r[j + len]);
                r[j + len] = r[j].wrapping_sub(t);
                r[j] = r[j].wrapping_add(t);
            }
        }
        len >>= 1;
    }
    for coeff in r.iter_mut() {
        *coeff = kred::barrett_reduce(*coeff);
    }
}

/// Inverse Kyber NTT in place, multiplying by the Montgomery factor 2^16
pub fn inv_ntt(r: &mut [i16; 256]) {
    let mut k = 127;
    let mut len = 2;
    while len <= 128 {
        for start in (0..256).step_by(2 * len) {
            let zeta = KYBER_ZETAS[k];
            k -= 1;
            for j in start..start + len {
                let t = r[j];
                r[j] = kred::barrett_reduce(t.wrapping_add(r[j + len]));
                r[j + len] = kred::fqmul(zeta, r[j + len].wrapping_sub(t));
            }
        }
        len <<= 1;
    }
    for coeff in r.iter_mut() {
        *coeff = kred::fqmul(*coeff, KYBER_INVNTT_F);
    }
}

/// Product of two degree-1 residues modulo `X^2 - zeta`
#[inline]
fn basemul_pair(a: [i16; 2], b: [i16; 2], zeta: i16) -> [i16; 2] {
    let r0 = kred::fqmul(kred::fqmul(a[1], b[1]), zeta).wrapping_add(kred::fqmul(a[0], b[0]));
    let r1 = kred::fqmul(a[0], b[1]).wrapping_add(kred::fqmul(a[1], b[0]));
    [r0, r1]
}

/// Multiply two polynomials in the Kyber NTT domain.
///
/// The result carries an extra factor 2^-16.
pub fn basemul(r: &mut [i16; 256], a: &[i16; 256], b: &[i16; 256]) {
    for i in 0..64 {
        let zeta = KYBER_ZETAS[64 + i];
        for (offset, z) in [(0, zeta), (2, -zeta)] {
            let idx = 4 * i + offset;
            let [r0, r1] = basemul_pair([a[idx], a[idx + 1]], [b[idx], b[idx + 1]], z);
            r[idx] = r0;
            r[idx + 1] = r1;
        }
    }
}

/// Forward Dilithium NTT in place, no final reduction.
///
/// For |coeff| < q on input, output coefficients are bounded by 9q.
pub fn dilithium_ntt(a: &mut [i32; 256]) {
    let mut k = 0;
    let mut len = 128;
    while len > 0 {
        for start in (0..256).step_by(2 * len) {
            k += 1;
            let zeta = DILITHIUM_ZETAS[k];
            for j in start..start + len {
                let t = dred::montgomery_reduce(i64::from(zeta) * i64::from(a[j + len]));
                a[j + len] = a[j] - t;
                a[j] += t;
            }
        }
        len >>= 1;
    }
}

/// Inverse Dilithium NTT in place, multiplying by 2^32.
///
/// For |coeff| < q on input, output coefficients are below q in magnitude.
pub fn dilithium_inv_ntt_tomont(a: &mut [i32; 256]) {
    let mut k = 256;
    let mut len = 1;
    while len < 256 {
        for start in (0..256).step_by(2 * len) {
            k -= 1;
            let zeta = -DILITHIUM_ZETAS[k];
            for j in start..start + len {
                let t = a[j];
                a[j] = t + a[j + len];
                a[j + len] = dred::montgomery_reduce(i64::from(zeta) * i64::from(t - a[j + len]));
            }
        }
        len <<= 1;
    }
    for coeff in a.iter_mut() {
        *coeff = dred::montgomery_reduce(i64::from(DILITHIUM_INVNTT_F) * i64::from(*coeff));
    }
}
