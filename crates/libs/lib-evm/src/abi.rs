//! Contract ABI definitions generated with alloy's `sol!` macro.
//!
//! Only the functions the launchpad calls are declared. The token constructor
//! arguments are encoded separately in [`crate::artifact`].

use alloy_sol_types::sol;

sol! {
    /// ERC-20 surface used for balances, allowances and metadata.
    #[derive(Debug, PartialEq, Eq)]
    interface IERC20 {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address owner) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }

    /// V2-style pair factory.
    #[derive(Debug, PartialEq, Eq)]
    interface IUniswapV2Factory {
        function getPair(address tokenA, address tokenB) external view returns (address pair);
        function createPair(address tokenA, address tokenB) external returns (address pair);
    }

    /// V2-style router, native-asset entry points only.
    #[derive(Debug, PartialEq, Eq)]
    interface IUniswapV2Router02 {
        function addLiquidityETH(
            address token,
            uint256 amountTokenDesired,
            uint256 amountTokenMin,
            uint256 amountETHMin,
            address to,
            uint256 deadline
        ) external payable returns (uint256 amountToken, uint256 amountETH, uint256 liquidity);

        function swapExactTokensForETH(
            uint256 amountIn,
            uint256 amountOutMin,
            address[] calldata path,
            address to,
            uint256 deadline
        ) external returns (uint256[] memory amounts);

        function swapExactETHForTokens(
            uint256 amountOutMin,
            address[] calldata path,
            address to,
            uint256 deadline
        ) external payable returns (uint256[] memory amounts);
    }
}
