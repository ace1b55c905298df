//! Operator sugar over [`BitOperations`].
//!
//! | operator          | operation                      |
//! |-------------------|--------------------------------|
//! | `!a`, `-a`        | complement                     |
//! | `&a ^ &b`         | xor                            |
//! | `&a \| &b`, `&a + &b` | union                      |
//! | `&a & &b`         | intersect (key against key)    |
//! | `&a & ids`        | intersect (select ids)         |
//! | `&a - &b`         | difference (key against key)   |
//! | `&a - ids`        | difference (reject ids)        |
//!
//! Every operator hits the store, so each one evaluates to a [`Result`].

use std::ops::{Add, BitAnd, BitOr, BitXor, Neg, Not, Sub};

use bitop_store::BitStore;

use crate::bitset::{BitOperations, Bitset, BitsetData, Derived};
use crate::error::Result;

macro_rules! unary_ops {
    ($($lhs:ident),+) => {
        $(
            impl<S: BitStore> Not for &$lhs<S> {
                type Output = Result<Bitset<S>>;

                fn not(self) -> Self::Output {
                    self.complement()
                }
            }

            impl<S: BitStore> Neg for &$lhs<S> {
                type Output = Result<Bitset<S>>;

                fn neg(self) -> Self::Output {
                    self.complement()
                }
            }
        )+
    };
}

macro_rules! bitset_ops {
    ($lhs:ident => $($rhs:ident),+) => {
        $(
            impl<S: BitStore> BitXor<&$rhs<S>> for &$lhs<S> {
                type Output = Result<Bitset<S>>;

                fn bitxor(self, rhs: &$rhs<S>) -> Self::Output {
                    self.xor(rhs)
                }
            }

            impl<S: BitStore> BitOr<&$rhs<S>> for &$lhs<S> {
                type Output = Result<Bitset<S>>;

                fn bitor(self, rhs: &$rhs<S>) -> Self::Output {
                    self.union(rhs)
                }
            }

            impl<S: BitStore> Add<&$rhs<S>> for &$lhs<S> {
                type Output = Result<Bitset<S>>;

                fn add(self, rhs: &$rhs<S>) -> Self::Output {
                    self.union(rhs)
                }
            }

            impl<S: BitStore> BitAnd<&$rhs<S>> for &$lhs<S> {
                type Output = Result<Bitset<S>>;

                fn bitand(self, rhs: &$rhs<S>) -> Self::Output {
                    self.intersect_bitset(rhs)
                }
            }

            impl<S: BitStore> Sub<&$rhs<S>> for &$lhs<S> {
                type Output = Result<Bitset<S>>;

                fn sub(self, rhs: &$rhs<S>) -> Self::Output {
                    self.difference_bitset(rhs)
                }
            }
        )+
    };
}

macro_rules! id_ops {
    ($($lhs:ident),+) => {
        $(
            impl<S: BitStore> BitAnd<Vec<u64>> for &$lhs<S> {
                type Output = Result<BitsetData<S>>;

                fn bitand(self, ids: Vec<u64>) -> Self::Output {
                    self.intersect_ids(ids)
                }
            }

            impl<S: BitStore> BitAnd<&[u64]> for &$lhs<S> {
                type Output = Result<BitsetData<S>>;

                fn bitand(self, ids: &[u64]) -> Self::Output {
                    self.intersect_ids(ids)
                }
            }

            impl<S: BitStore, const N: usize> BitAnd<[u64; N]> for &$lhs<S> {
                type Output = Result<BitsetData<S>>;

                fn bitand(self, ids: [u64; N]) -> Self::Output {
                    self.intersect_ids(ids)
                }
            }

            impl<S: BitStore> Sub<Vec<u64>> for &$lhs<S> {
                type Output = Result<BitsetData<S>>;

                fn sub(self, ids: Vec<u64>) -> Self::Output {
                    self.difference_ids(ids)
                }
            }

            impl<S: BitStore> Sub<&[u64]> for &$lhs<S> {
                type Output = Result<BitsetData<S>>;

                fn sub(self, ids: &[u64]) -> Self::Output {
                    self.difference_ids(ids)
                }
            }

            impl<S: BitStore, const N: usize> Sub<[u64; N]> for &$lhs<S> {
                type Output = Result<BitsetData<S>>;

                fn sub(self, ids: [u64; N]) -> Self::Output {
                    self.difference_ids(ids)
                }
            }
        )+
    };
}

unary_ops!(Bitset, BitsetData, Derived);

bitset_ops!(Bitset => Bitset, BitsetData, Derived);
bitset_ops!(BitsetData => Bitset, BitsetData, Derived);
bitset_ops!(Derived => Bitset, BitsetData, Derived);

id_ops!(Bitset, BitsetData, Derived);

#[cfg(test)]
mod tests {
    use crate::client::BitopClient;
    use crate::error::Result;
    use bitop_store::{BitStore, MemoryStore};

    fn setup() -> (
        BitopClient<MemoryStore>,
        crate::Bitset<MemoryStore>,
        crate::Bitset<MemoryStore>,
    ) {
        let client = BitopClient::with_namespace(MemoryStore::new(), "ev").unwrap();
        for id in [1, 2, 3] {
            client.store().set_bit("ev_a", id, true).unwrap();
        }
        for id in [2, 3, 4] {
            client.store().set_bit("ev_b", id, true).unwrap();
        }
        let (a, b) = (client.scoped("a"), client.scoped("b"));
        (client, a, b)
    }

    #[test]
    fn test_binary_operators() -> Result<()> {
        let (client, a, b) = setup();
        let store = client.store();

        assert_eq!(store.ones((&a & &b)?.key()), vec![2, 3]);
        assert_eq!(store.ones((&a | &b)?.key()), vec![1, 2, 3, 4]);
        assert_eq!(store.ones((&a ^ &b)?.key()), vec![1, 4]);
        assert_eq!(store.ones((&a - &b)?.key()), vec![1]);

        let plus = (&a + &b)?;
        assert_eq!(plus.key(), (&a | &b)?.key());
        Ok(())
    }

    #[test]
    fn test_id_operators() -> Result<()> {
        let (_client, a, _b) = setup();

        assert_eq!((&a & vec![2, 3, 4])?, vec![2, 3]);
        assert_eq!((&a & [2, 3, 4])?, [2, 3]);
        assert_eq!((&a & &[4, 1][..])?, [1]);
        assert_eq!((&a - vec![2, 3, 4])?, vec![4]);
        assert_eq!((&a - [20, 40, 50])?, [20, 40, 50]);
        Ok(())
    }

    #[test]
    fn test_negation_aliases() -> Result<()> {
        let (client, a, _b) = setup();

        let not = (!&a)?;
        let neg = (-&a)?;
        assert_eq!(not.key(), "ev_bitop_NOT_ev_a");
        assert_eq!(neg.key(), not.key());
        assert_eq!(client.store().ones(not.key()), vec![0, 4, 5, 6, 7]);
        Ok(())
    }

    #[test]
    fn test_chained_expression() -> Result<()> {
        let (client, a, b) = setup();
        client.store().set_bit("ev_c", 1, true)?;
        let c = client.scoped("c");

        // (a AND [1, 2, 9]) OR (b - c)
        let selected = (&a & [1, 2, 9])?;
        let rest = (&b - &c)?;
        let result = (&selected | &rest)?;

        assert_eq!(client.store().ones(result.key()), vec![1, 2, 3, 4]);
        Ok(())
    }
}
