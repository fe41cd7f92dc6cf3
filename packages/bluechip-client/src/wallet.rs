//! Mnemonic-backed signing key, standing in for the browser wallet.

use bip32::{DerivationPath, Language, Mnemonic, XPrv};
use cosmrs::{
    crypto::{secp256k1::SigningKey, PublicKey},
    tx::{Raw, SignDoc},
    AccountId,
};

use crate::error::ClientResult;

/// A secp256k1 key derived at the cosmos path `m/44'/{coin_type}'/0'/0/0`.
pub struct Wallet {
    signing_key: SigningKey,
    account_id: AccountId,
}

impl Wallet {
    /// Derives the first account of a 24-word bip39 `phrase` for the given
    /// bech32 prefix. Fails on an invalid mnemonic or prefix without partial
    /// state.
    pub fn from_mnemonic(phrase: &str, coin_type: u32, prefix: &str) -> ClientResult<Self> {
        let mnemonic = Mnemonic::new(phrase.trim(), Language::English)?;
        let seed = mnemonic.to_seed("");
        let path: DerivationPath = format!("m/44'/{coin_type}'/0'/0/0").parse()?;
        let xprv = XPrv::derive_from_path(&seed, &path)?;
        let signing_key = SigningKey::from(xprv);
        let account_id = signing_key.public_key().account_id(prefix)?;
        Ok(Wallet {
            signing_key,
            account_id,
        })
    }

    /// The wallet's bech32 address.
    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    pub fn public_key(&self) -> PublicKey {
        self.signing_key.public_key()
    }

    pub fn sign(&self, sign_doc: SignDoc) -> ClientResult<Raw> {
        Ok(sign_doc.sign(&self.signing_key)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use speculoos::prelude::*;

    // Standard 24-word bip39 test vector phrase (all-zero entropy).
    const PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art";

    #[test]
    fn derives_deterministic_address() {
        let a = Wallet::from_mnemonic(PHRASE, 118, "bluechip").unwrap();
        let b = Wallet::from_mnemonic(PHRASE, 118, "bluechip").unwrap();
        assert_eq!(a.account_id(), b.account_id());
        assert_that!(a.account_id().to_string()).starts_with("bluechip1");
    }

    #[test]
    fn prefix_changes_address_not_key() {
        let bluechip = Wallet::from_mnemonic(PHRASE, 118, "bluechip").unwrap();
        let cosmos = Wallet::from_mnemonic(PHRASE, 118, "cosmos").unwrap();
        assert_eq!(
            bluechip.public_key().to_bytes(),
            cosmos.public_key().to_bytes()
        );
        assert_ne!(
            bluechip.account_id().to_string(),
            cosmos.account_id().to_string()
        );
    }

    #[test]
    fn bad_mnemonic_is_rejected() {
        assert!(Wallet::from_mnemonic("not a mnemonic", 118, "bluechip").is_err());
    }

    #[test]
    fn twelve_word_phrase_is_rejected() {
        let twelve = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
        assert!(Wallet::from_mnemonic(twelve, 118, "bluechip").is_err());
    }
}
