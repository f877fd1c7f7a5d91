//! Cayley–Dickson doubling over Z/5Z and beyond.


use cayley_algebra::{
    doubling, Algebra, AlgebraError, AlgebraTag, Coercible, Element, ErrorKind,
};
use test_helpers::{gaussian5, hamilton, octonions, unit, z};

#[test]
fn gaussian_integers_mod_5() {
    let (r, d) = gaussian5();
    let p = d.pair(r.element(2), r.element(3)).unwrap();
    let q = d.pair(r.element(1), r.element(1)).unwrap();

    assert_eq!(p.add(&q).unwrap(), d.pair(r.element(3), r.element(4)).unwrap());
    assert_eq!(p.conjugate(), d.pair(r.element(2), r.element(2)).unwrap());
    // 2·2 + 4·(−3·3) = −32 ≡ 3 (mod 5)
    assert_eq!(p.cayley_norm().downcast().unwrap(), r.element(3));
    assert_eq!(p.cayley_norm(), d.upcast_integer(3));
    assert_eq!(p.cayley_trace(), d.upcast_integer(4));
}

#[test]
fn new_unit_squares_to_structural() {
    let (r, d) = gaussian5();
    let i = d.pair(r.zero(), r.one()).unwrap();
    assert_eq!(i.mul(&i).unwrap(), d.upcast(&r.element(4)).unwrap());
    assert!(i.is_unimodular());
    assert_eq!(i.pow(4).unwrap(), d.one());
}

#[test]
fn products_and_quotients() {
    let (r, d) = gaussian5();
    let p = d.pair(r.element(2), r.element(3)).unwrap();
    let q = d.pair(r.element(1), r.element(1)).unwrap();

    // (2 + 3i)(1 + i) = −1 + 5i
    assert_eq!(p.mul(&q).unwrap(), d.from_coordinates(&[4, 0]).unwrap());
    assert_eq!(p.inverse().unwrap(), d.from_coordinates(&[4, 4]).unwrap());
    assert_eq!(q.inverse().unwrap(), d.from_coordinates(&[3, 2]).unwrap());
    assert_eq!(p.div(&q).unwrap(), d.from_coordinates(&[0, 3]).unwrap());
    assert_eq!(p.mul(&p.inverse().unwrap()).unwrap(), d.one());
    assert_eq!(p.sub(&q).unwrap(), d.from_coordinates(&[1, 2]).unwrap());
    assert_eq!(p.neg(), d.from_coordinates(&[3, 2]).unwrap());
}

#[test]
fn zero_divisors_are_not_invertible() {
    let (r, d) = gaussian5();
    // 1 + 2i has norm 1 + 4 ≡ 0.
    let zd = d.pair(r.element(1), r.element(2)).unwrap();
    assert!(!zd.is_invertible());
    let err = zd.inverse().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ZeroDivision);
    assert_eq!(err.to_string(), "(1, 2) {4 [5]} is not invertible");

    let p = d.from_coordinates(&[2, 3]).unwrap();
    assert_eq!(p.div(&zd).unwrap_err().kind(), ErrorKind::ZeroDivision);
    assert_eq!(zd.pow(-1).unwrap_err().kind(), ErrorKind::ZeroDivision);
}

#[test]
fn powers() {
    let (_, d) = gaussian5();
    let p = d.from_coordinates(&[2, 3]).unwrap();
    assert_eq!(p.pow(0).unwrap(), d.one());
    assert_eq!(p.pow(1).unwrap(), p);
    // (2 + 3i)² = −5 + 12i
    assert_eq!(p.pow(2).unwrap(), d.from_coordinates(&[0, 2]).unwrap());
    assert_eq!(p.pow(-1).unwrap(), p.inverse().unwrap());
    assert_eq!(
        p.pow(5).unwrap(),
        p.pow(2).unwrap().mul(&p.pow(3).unwrap()).unwrap()
    );
}

#[test]
fn factory_requires_matching_base_rings() {
    let r = z(5);
    let err = doubling(r, z(7).element(1)).unwrap_err();
    assert!(matches!(err, AlgebraError::BaseRingMismatch { .. }));
    assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn components_must_come_from_the_base() {
    let (r, d) = gaussian5();
    let err = d.pair(z(7).element(1), r.one()).unwrap_err();
    assert!(matches!(err, AlgebraError::ComponentMismatch { .. }));
    assert_eq!(err.kind(), ErrorKind::Type);
    assert!(d.pair(r.one(), z(7).element(1)).is_err());
    assert_eq!(d.lift(r.element(2)).unwrap(), d.upcast_integer(2));
}

#[test]
fn tags_distinguish_structural_constants() {
    let (r, d) = gaussian5();
    let d2 = doubling(r.clone(), r.element(2)).unwrap();
    assert_eq!(d.dimension(), d2.dimension());
    assert_ne!(d.tag(), d2.tag());
    assert_eq!(d.base_ring_tag(), d2.base_ring_tag());
    assert_eq!(d.tag().to_string(), "doubling(congruence_ring(5), 4)");
    assert_eq!(d.tag().depth(), 1);
    assert_eq!(d.tag().leaf(), &AlgebraTag::Congruence { cardinal: 5 });

    let a = d.from_coordinates(&[1, 1]).unwrap();
    let b = d2.from_coordinates(&[1, 1]).unwrap();
    assert!(a != b);
    assert!(!a.eq_dyn(&b));
    let err = a.add(&b).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
    assert!(a.mul(&b).is_err());
    assert!(a.div(&b).is_err());

    // Same parameters, separately built: same algebra.
    let again = doubling(z(5), z(5).element(4)).unwrap();
    assert_eq!(again.from_coordinates(&[1, 1]).unwrap(), a);
}

#[test]
fn external_product_by_base_ring_scalars() {
    let (r, d) = gaussian5();
    let p = d.from_coordinates(&[2, 3]).unwrap();
    assert_eq!(p.scale(&r.element(2)).unwrap(), d.from_coordinates(&[4, 1]).unwrap());
    let err = p.scale(&z(7).element(2)).unwrap_err();
    assert!(matches!(err, AlgebraError::ScalarMismatch { .. }));
}

#[test]
fn upcast_and_downcast() {
    let (r, d) = gaussian5();
    let three = r.element(3);
    let lifted = d.upcast(&three).unwrap();
    assert_eq!(lifted, d.from_coordinates(&[3, 0]).unwrap());
    assert_eq!(d.downcast(&lifted).unwrap(), three);

    let p = d.from_coordinates(&[2, 3]).unwrap();
    assert_eq!(d.upcast(&p).unwrap(), p);
    // Downcast keeps the leaf part of component 0.
    assert_eq!(p.downcast().unwrap(), r.element(2));

    let err = d.upcast(&z(7).element(1)).unwrap_err();
    assert!(matches!(err, AlgebraError::Upcast { .. }));
    assert_eq!(err.kind(), ErrorKind::Type);

    let d2 = doubling(r.clone(), r.element(2)).unwrap();
    let foreign = d2.from_coordinates(&[1, 1]).unwrap();
    assert!(d.upcast(&foreign).is_err());
    assert!(matches!(d.downcast(&foreign), Err(AlgebraError::Downcast { .. })));
}

#[test]
fn upcast_through_several_levels() {
    let h = hamilton(7);
    let c = h.base().clone();
    let ring = h.base_ring().clone();

    let s = ring.element(5);
    assert_eq!(h.upcast(&s).unwrap(), h.from_coordinates(&[5, 0, 0, 0]).unwrap());

    let w = c.from_coordinates(&[1, 2]).unwrap();
    assert_eq!(h.upcast(&w).unwrap(), h.from_coordinates(&[1, 2, 0, 0]).unwrap());

    let x = h.from_coordinates(&[3, 1, 4, 1]).unwrap();
    assert_eq!(h.upcast(&x).unwrap(), x);
    assert_eq!(h.downcast(&h.upcast(&s).unwrap()).unwrap(), s);

    // An element of a higher level never comes down through upcast.
    assert!(c.upcast(&x).is_err());
}

#[test]
fn quaternion_units() {
    let h = hamilton(7);
    let e = |idx| h.from_coordinates(&unit(4, idx)).unwrap();
    let (one, i, j, k) = (e(0), e(1), e(2), e(3));
    let minus_one = one.neg();

    assert_eq!(h.one(), one);
    assert_eq!(i.mul(&i).unwrap(), minus_one);
    assert_eq!(j.mul(&j).unwrap(), minus_one);
    assert_eq!(k.mul(&k).unwrap(), minus_one);
    assert_eq!(i.mul(&j).unwrap(), k);
    assert_eq!(j.mul(&k).unwrap(), i);
    assert_eq!(k.mul(&i).unwrap(), j);
    assert_eq!(j.mul(&i).unwrap(), k.neg());
    assert_eq!(i.mul(&j).unwrap().mul(&k).unwrap(), minus_one);
}

#[test]
fn quaternions_are_associative_but_not_commutative() {
    let h = hamilton(7);
    let basis: Vec<_> = (0..4)
        .map(|idx| h.from_coordinates(&unit(4, idx)).unwrap())
        .collect();
    let mut commutes = true;
    for a in &basis {
        for b in &basis {
            if a.mul(b).unwrap() != b.mul(a).unwrap() {
                commutes = false;
            }
            for c in &basis {
                let left = a.mul(b).unwrap().mul(c).unwrap();
                let right = a.mul(&b.mul(c).unwrap()).unwrap();
                assert_eq!(left, right);
            }
        }
    }
    assert!(!commutes);
}

#[test]
fn octonions_are_not_associative_but_alternative() {
    let o = octonions(11);
    let basis: Vec<_> = (0..8)
        .map(|idx| o.from_coordinates(&unit(8, idx)).unwrap())
        .collect();
    let mut associative = true;
    for a in &basis {
        for b in &basis {
            let aab = a.mul(a).unwrap().mul(b).unwrap();
            let a_ab = a.mul(&a.mul(b).unwrap()).unwrap();
            assert_eq!(aab, a_ab);
            for c in &basis {
                let left = a.mul(b).unwrap().mul(c).unwrap();
                let right = a.mul(&b.mul(c).unwrap()).unwrap();
                if left != right {
                    associative = false;
                }
            }
        }
    }
    assert!(!associative);
}

#[test]
fn dump_flatten_and_rendering() {
    let h = hamilton(5);
    let x = h.from_coordinates(&[1, 2, 3, 4]).unwrap();
    assert_eq!(x.dump(), vec![1, 2, 3, 4]);
    let ring = h.base_ring();
    assert_eq!(
        x.flatten(),
        vec![ring.element(1), ring.element(2), ring.element(3), ring.element(4)]
    );
    assert_eq!(x.to_string(), "(1, 2, 3, 4) {4 [5], 4 [5]}");
    assert_eq!(h.structurals(), vec![ring.element(4), ring.element(4)]);
    assert_eq!(
        h.tag().to_string(),
        "doubling(doubling(congruence_ring(5), 4), 4)"
    );

    let (first, second) = x.components();
    assert_eq!(first.dump(), vec![1, 2]);
    assert_eq!(second.dump(), vec![3, 4]);
    assert_eq!(x.first(), first);
    assert_eq!(x.second(), second);

    assert_eq!(
        h.from_coordinates(&[1, 2, 3]).unwrap_err(),
        AlgebraError::Dimension { expected: 4, got: 3 }
    );
    assert!(h.zero().is_zero());
    assert!(!x.is_zero());
}

#[test]
fn norms_land_in_the_base_ring() {
    let h = hamilton(7);
    let x = h.from_coordinates(&[1, 2, 3, 4]).unwrap();
    let n = x.cayley_norm();
    // 1 + 4 + 9 + 16 = 30 ≡ 2 (mod 7)
    assert_eq!(n, h.upcast_integer(2));
    assert!(x.is_invertible());
    assert!(!x.is_unimodular());
    assert_eq!(x.cayley_trace(), h.upcast_integer(2));
    assert_eq!(x.mul(&x.inverse().unwrap()).unwrap(), h.one());
    assert_eq!(x.inverse().unwrap().mul(&x).unwrap(), h.one());

    let u = h.from_coordinates(&[0, 0, 0, 1]).unwrap();
    assert!(u.is_unimodular());
}

#[test]
fn tower_equality_is_total() {
    fn same<T: Eq>(x: &T, y: &T) -> bool {
        x == y
    }
    let h = hamilton(7);
    let x = h.from_coordinates(&[1, 2, 3, 4]).unwrap();
    assert!(same(&x, &x.clone()));
    assert!(!same(&x, &h.one()));
    let o = octonions(7);
    assert!(same(&o.one(), &o.upcast_integer(8)));
}
