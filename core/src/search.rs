// Validation for the search forms shown by the front ends
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("Both fields are required")]
    MissingNftFields,
    #[error("Address is required")]
    MissingAddress,
}

fn filled(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// NFT search form: contract address plus token id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftSearch {
    pub nft_address: Option<String>,
    pub token_id: Option<String>,
}

impl NftSearch {
    /// The form has not been submitted when both fields are absent.
    pub fn is_submitted(&self) -> bool {
        self.nft_address.is_some() || self.token_id.is_some()
    }

    pub fn validate(&self) -> Result<(String, String), SearchError> {
        match (filled(&self.nft_address), filled(&self.token_id)) {
            (Some(address), Some(token_id)) => Ok((address, token_id)),
            _ => Err(SearchError::MissingNftFields),
        }
    }
}

/// Account balance search form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressSearch {
    pub address: Option<String>,
}

impl AddressSearch {
    pub fn is_submitted(&self) -> bool {
        self.address.is_some()
    }

    pub fn validate(&self) -> Result<String, SearchError> {
        filled(&self.address).ok_or(SearchError::MissingAddress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nft(address: Option<&str>, token: Option<&str>) -> NftSearch {
        NftSearch {
            nft_address: address.map(str::to_string),
            token_id: token.map(str::to_string),
        }
    }

    #[test]
    fn test_nft_search_requires_both_fields() {
        assert_eq!(
            nft(Some("0xabc"), None).validate(),
            Err(SearchError::MissingNftFields)
        );
        assert_eq!(
            nft(None, Some("1")).validate(),
            Err(SearchError::MissingNftFields)
        );
        assert_eq!(
            nft(Some("0xabc"), Some("   ")).validate(),
            Err(SearchError::MissingNftFields)
        );
        assert_eq!(
            nft(Some(""), Some("")).validate(),
            Err(SearchError::MissingNftFields)
        );
        assert_eq!(
            SearchError::MissingNftFields.to_string(),
            "Both fields are required"
        );
    }

    #[test]
    fn test_nft_search_trims_values() {
        assert_eq!(
            nft(Some(" 0xabc "), Some("42\n")).validate(),
            Ok(("0xabc".to_string(), "42".to_string()))
        );
        assert!(!nft(None, None).is_submitted());
        assert!(nft(Some(""), None).is_submitted());
    }

    #[test]
    fn test_address_search() {
        let form: AddressSearch = serde_json::from_str(r#"{"address":"  "}"#).unwrap();
        assert!(form.is_submitted());
        assert_eq!(form.validate(), Err(SearchError::MissingAddress));

        let form = AddressSearch {
            address: Some("0xabc".to_string()),
        };
        assert_eq!(form.validate(), Ok("0xabc".to_string()));
    }

    #[test]
    fn test_nft_form_field_names() {
        let form: NftSearch =
            serde_json::from_str(r#"{"nftAddress":"0xabc","tokenId":"7"}"#).unwrap();
        assert_eq!(form.validate(), Ok(("0xabc".to_string(), "7".to_string())));
    }
}
