//! # Contract Interfaces
//!
//! `sol!` bindings for every view method the monitors call. Each generated
//! `*Call` type carries its selector, canonical signature and return decoder;
//! the JSON-RPC adapter encodes and decodes through them, and the method
//! table in [`crate::contracts::methods`] names them.

alloy::sol! {
    /// ERC-20 metadata and supply.
    interface IERC20 {
        function name() external view returns (string);
        function totalSupply() external view returns (uint256);
        function decimals() external view returns (uint256);
    }

    /// RToken link to its component directory.
    interface IRToken {
        function main() external view returns (address);
    }

    /// RToken component directory.
    interface IMain {
        function assetRegistry() external view returns (address);
        function basketHandler() external view returns (address);
    }

    /// Registered collateral and assets of one RToken.
    interface IAssetRegistry {
        function erc20s() external view returns (address[]);
        function toAsset(address erc20) external view returns (address);
    }

    /// Asset plugin; `lastSave` is a uint48 on chain and decodes the same as a word.
    interface IAsset {
        function lastSave() external view returns (uint256);
    }

    /// Collateralization status of one RToken.
    interface IBasketHandler {
        function fullyCollateralized() external view returns (bool);
    }
}
